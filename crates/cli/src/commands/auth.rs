use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;
use space_cli_api::ApiClient;
use space_cli_config::{profile_token_env, Config, Profile};
use space_cli_output::OutputRenderer;
use url::Url;

use crate::ActiveProfile;

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Add or update a profile
    Login(LoginArgs),
    /// Remove a profile, or only its stored token
    Logout(LogoutArgs),
    /// List configured profiles
    List,
    /// Show the profile the token belongs to
    Whoami,
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Profile name to create or update.
    #[arg(long)]
    pub profile: String,
    /// Organization URL (e.g. https://acme.jetbrains.space).
    #[arg(long)]
    pub base_url: String,
    /// Permanent token to store in the config file. Leave unset to rely on
    /// SPACE_TOKEN or SPACE_CLI_TOKEN_<PROFILE> instead.
    #[arg(long)]
    pub token: Option<String>,
    /// Default page size for list commands.
    #[arg(long)]
    pub list_limit: Option<u32>,
    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Mark this profile as the default one.
    #[arg(long)]
    pub default: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LogoutArgs {
    /// Profile to log out of.
    #[arg(long)]
    pub profile: String,
    /// Keep the profile entry and only forget its token.
    #[arg(long)]
    pub keep_profile: bool,
}

impl AuthCommand {
    /// Whether the command talks to Space rather than only the config file.
    pub fn needs_client(&self) -> bool {
        matches!(self, AuthCommand::Whoami)
    }
}

pub async fn handle(
    command: AuthCommand,
    config: &mut Config,
    config_path: Option<&Path>,
    active: Option<&ActiveProfile>,
    renderer: &OutputRenderer,
) -> Result<()> {
    match command {
        AuthCommand::Login(args) => login(&args, config, config_path),
        AuthCommand::Logout(args) => logout(&args, config, config_path),
        AuthCommand::List => list_profiles(config, renderer),
        AuthCommand::Whoami => {
            let active = active.context("No active profile")?;
            whoami(&active.client, &active.name, renderer).await
        }
    }
}

async fn whoami(client: &ApiClient, profile_name: &str, renderer: &OutputRenderer) -> Result<()> {
    let me = client
        .get_user("me")
        .await
        .context("Failed to fetch the current profile")?;

    renderer.render(&json!({
        "profile": profile_name,
        "base_url": client.base_url().as_str(),
        "id": me.get("id").cloned().unwrap_or_default(),
        "username": me.get("username").cloned().unwrap_or_default(),
    }))
}

fn login(args: &LoginArgs, config: &mut Config, config_path: Option<&Path>) -> Result<()> {
    if args.profile.trim().is_empty() {
        return Err(anyhow!("Profile name cannot be empty"));
    }

    let base_url = Url::parse(&args.base_url)
        .with_context(|| format!("Invalid Space organization URL: {}", args.base_url))?;

    let token = args
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned);

    let mut profile = config.profile(&args.profile).cloned().unwrap_or_default();
    profile.base_url = Some(base_url.as_str().trim_end_matches('/').to_string());
    if token.is_some() {
        profile.token = token;
    }
    if args.list_limit.is_some() {
        profile.list_limit = args.list_limit;
    }
    if args.timeout_secs.is_some() {
        profile.timeout_secs = args.timeout_secs;
    }

    if profile.resolve_token(&args.profile).is_none() {
        tracing::warn!(
            profile = %args.profile,
            env = %profile_token_env(&args.profile),
            "No token stored or found in the environment"
        );
    }

    config.upsert_profile(args.profile.clone(), profile, args.default);
    config
        .save(config_path)
        .context("Unable to persist configuration file")?;

    tracing::info!(profile = %args.profile, base_url = %base_url, "Profile saved");
    Ok(())
}

fn logout(args: &LogoutArgs, config: &mut Config, config_path: Option<&Path>) -> Result<()> {
    if config.profile(&args.profile).is_none() {
        return Err(anyhow!("Profile '{}' does not exist", args.profile));
    }

    if args.keep_profile {
        if let Some(profile) = config.profiles.get_mut(&args.profile) {
            profile.token = None;
        }
    } else {
        config.remove_profile(&args.profile);
    }

    config
        .save(config_path)
        .context("Unable to persist configuration file")?;
    tracing::info!(profile = %args.profile, "Logged out");
    Ok(())
}

fn list_profiles(config: &Config, renderer: &OutputRenderer) -> Result<()> {
    let rows: Vec<_> = config
        .profiles
        .iter()
        .map(|(name, profile)| profile_row(name, profile, config.default_profile.as_deref()))
        .collect();

    renderer.render_list(
        &rows,
        "No profiles configured yet. Use `space-cli auth login` to add one.",
    )
}

fn profile_row(name: &str, profile: &Profile, default: Option<&str>) -> serde_json::Value {
    json!({
        "name": name,
        "base_url": profile.base_url.as_deref().unwrap_or(""),
        "has_token": profile.resolve_token(name).is_some(),
        "list_limit": profile.list_limit,
        "is_default": default == Some(name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_writes_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut config = Config::default();

        let args = LoginArgs {
            profile: "work".into(),
            base_url: "https://acme.jetbrains.space/".into(),
            token: Some(" tok ".into()),
            list_limit: Some(200),
            timeout_secs: None,
            default: false,
        };
        login(&args, &mut config, Some(path.as_path())).unwrap();

        let saved = Config::load(Some(path.as_path())).unwrap();
        let work = saved.profile("work").unwrap();
        assert_eq!(work.base_url.as_deref(), Some("https://acme.jetbrains.space"));
        assert_eq!(work.token.as_deref(), Some("tok"));
        assert_eq!(work.list_limit, Some(200));
        assert_eq!(saved.default_profile.as_deref(), Some("work"));
    }

    #[test]
    fn test_login_rejects_bad_url() {
        let mut config = Config::default();
        let args = LoginArgs {
            profile: "work".into(),
            base_url: "acme".into(),
            token: None,
            list_limit: None,
            timeout_secs: None,
            default: false,
        };
        let dir = tempfile::tempdir().unwrap();
        let err = login(&args, &mut config, Some(dir.path().join("c.yaml").as_path())).unwrap_err();
        assert!(err.to_string().contains("Invalid Space organization URL"));
    }

    #[test]
    fn test_logout_keep_profile_drops_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut config = Config::default();
        config.upsert_profile(
            "work",
            Profile {
                base_url: Some("https://acme.jetbrains.space".into()),
                token: Some("tok".into()),
                ..Default::default()
            },
            true,
        );

        let args = LogoutArgs {
            profile: "work".into(),
            keep_profile: true,
        };
        logout(&args, &mut config, Some(path.as_path())).unwrap();
        assert!(config.profile("work").unwrap().token.is_none());

        let args = LogoutArgs {
            profile: "work".into(),
            keep_profile: false,
        };
        logout(&args, &mut config, Some(path.as_path())).unwrap();
        assert!(config.profiles.is_empty());
        assert!(logout(&args, &mut config, Some(path.as_path())).is_err());
    }

    #[test]
    fn test_profile_row_marks_default() {
        let profile = Profile {
            base_url: Some("https://acme.jetbrains.space".into()),
            ..Default::default()
        };
        let row = profile_row("work", &profile, Some("work"));
        assert_eq!(row["is_default"], true);
        assert_eq!(row["base_url"], "https://acme.jetbrains.space");
    }
}
