mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use commands::auth::AuthCommand;
use commands::blog::BlogCommands;
use commands::chat::{ChannelCommands, ChatCommands};
use commands::directory::{
    InvitationCommands, MembershipCommands, RoleCommands, TeamCommands, UserCommands,
};
use commands::project::ProjectCommands;
use commands::repo::RepoCommands;
use commands::review::ReviewCommands;
use commands::CommandContext;
use space_cli_api::{ApiClient, ApiError};
use space_cli_config::{profile_token_env, Config, TOKEN_ENV};
use space_cli_output::{OutputFormat, OutputRenderer};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "space-cli", version, about = "Command-line client for JetBrains Space", long_about = None)]
struct Cli {
    /// Profile to use from config file
    #[arg(short, long, env = "SPACE_CLI_PROFILE")]
    profile: Option<String>,

    /// Path to config file (defaults to ~/.space-cli/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for command results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Request timeout in seconds (overrides the profile; no timeout by default)
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: SpaceCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum SpaceCommand {
    /// Project commands
    #[command(subcommand)]
    Project(ProjectCommands),
    /// Member profile commands
    #[command(subcommand)]
    User(UserCommands),
    /// Team commands
    #[command(subcommand)]
    Team(TeamCommands),
    /// Team membership commands
    #[command(subcommand)]
    Membership(MembershipCommands),
    /// Role commands
    #[command(subcommand)]
    Role(RoleCommands),
    /// Invitation commands
    #[command(subcommand)]
    Invitation(InvitationCommands),
    /// Code review commands
    #[command(subcommand)]
    Review(ReviewCommands),
    /// Chat channel commands
    #[command(subcommand)]
    Channel(ChannelCommands),
    /// Chat message commands
    #[command(subcommand)]
    Chat(ChatCommands),
    /// Repository commands
    #[command(subcommand)]
    Repo(RepoCommands),
    /// Blog commands
    #[command(subcommand)]
    Blog(BlogCommands),
    /// Authentication commands
    #[command(subcommand)]
    Auth(AuthCommand),
}

impl SpaceCommand {
    fn needs_client(&self) -> bool {
        match self {
            SpaceCommand::Auth(command) => command.needs_client(),
            _ => true,
        }
    }
}

/// The resolved profile name and a client built from it.
pub struct ActiveProfile {
    pub name: String,
    pub client: ApiClient,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if let Some(hint) = err.downcast_ref::<ApiError>().and_then(ApiError::suggestion) {
                eprintln!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let config_path = cli.config.clone();
    let mut config = Config::load(config_path.as_ref())?;
    let renderer = OutputRenderer::new(cli.output);

    let active = if cli.command.needs_client() {
        Some(resolve_active_profile(
            &config,
            cli.profile.as_deref(),
            cli.timeout,
        )?)
    } else {
        None
    };

    let command = cli.command;
    let ctx = match active {
        Some(ref active) => Some(CommandContext {
            client: active.client.clone(),
            renderer: &renderer,
        }),
        None => None,
    };
    let ctx = || ctx.as_ref().ok_or_else(|| anyhow!("no active profile"));

    match command {
        SpaceCommand::Project(command) => commands::project::execute(command, ctx()?).await,
        SpaceCommand::User(command) => commands::directory::execute_user(command, ctx()?).await,
        SpaceCommand::Team(command) => commands::directory::execute_team(command, ctx()?).await,
        SpaceCommand::Membership(command) => {
            commands::directory::execute_membership(command, ctx()?).await
        }
        SpaceCommand::Role(command) => commands::directory::execute_role(command, ctx()?).await,
        SpaceCommand::Invitation(command) => {
            commands::directory::execute_invitation(command, ctx()?).await
        }
        SpaceCommand::Review(command) => commands::review::execute(command, ctx()?).await,
        SpaceCommand::Channel(command) => commands::chat::execute_channel(command, ctx()?).await,
        SpaceCommand::Chat(command) => commands::chat::execute_chat(command, ctx()?).await,
        SpaceCommand::Repo(command) => commands::repo::execute(command, ctx()?).await,
        SpaceCommand::Blog(command) => commands::blog::execute(command, ctx()?).await,
        SpaceCommand::Auth(command) => {
            commands::auth::handle(
                command,
                &mut config,
                config_path.as_deref(),
                active.as_ref(),
                &renderer,
            )
            .await
        }
    }
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug {
        "info,space_cli=debug,space_cli_api=debug,space_cli_config=debug"
    } else {
        "warn,space_cli=info,space_cli_api=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logger: {err}"))
}

fn resolve_active_profile(
    config: &Config,
    requested: Option<&str>,
    timeout: Option<u64>,
) -> Result<ActiveProfile> {
    let (name, profile) = config
        .resolve_profile(requested)
        .ok_or_else(|| anyhow!("No profile configured. Run `space-cli auth login` first."))?;

    let token = profile.resolve_token(name).ok_or_else(|| {
        anyhow!(
            "No token found for profile '{name}'. Set {} or {TOKEN_ENV}, or run `space-cli auth login --profile {name} --token ...`",
            profile_token_env(name)
        )
    })?;

    let mut client_config = profile.client_config(name, token)?;
    if let Some(secs) = timeout {
        client_config = client_config.with_timeout(Duration::from_secs(secs));
    }

    Ok(ActiveProfile {
        name: name.to_string(),
        client: ApiClient::from_config(client_config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use space_cli_config::Profile;

    #[test]
    fn test_cli_parses_nested_commands() {
        let cli = Cli::try_parse_from([
            "space-cli",
            "--output",
            "json",
            "review",
            "list",
            "key:ABC",
            "--state",
            "Merged",
            "--limit",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, SpaceCommand::Review(_)));
    }

    #[test]
    fn test_cli_rejects_unknown_review_state() {
        let result = Cli::try_parse_from(["space-cli", "review", "list", "p1", "--state", "Pending"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_auth_list_needs_no_client() {
        let cli = Cli::try_parse_from(["space-cli", "auth", "list"]).unwrap();
        assert!(!cli.command.needs_client());
        let cli = Cli::try_parse_from(["space-cli", "auth", "whoami"]).unwrap();
        assert!(cli.command.needs_client());
    }

    #[test]
    fn test_resolve_active_profile_requires_profile() {
        let err = resolve_active_profile(&Config::default(), None, None)
            .err()
            .unwrap();
        assert!(err.to_string().contains("No profile configured"));
    }

    #[test]
    fn test_resolve_active_profile_builds_client() {
        let mut config = Config::default();
        config.upsert_profile(
            "space-cli-main-test",
            Profile {
                base_url: Some("https://acme.jetbrains.space".into()),
                token: Some("stored".into()),
                list_limit: Some(50),
                ..Default::default()
            },
            true,
        );

        let active = resolve_active_profile(&config, None, Some(10)).unwrap();
        assert_eq!(active.name, "space-cli-main-test");
        assert_eq!(active.client.list_limit(), 50);
        assert_eq!(
            active.client.api_url().as_str(),
            "https://acme.jetbrains.space/api/http"
        );
    }

    #[test]
    fn test_resolve_active_profile_rejects_zero_timeout() {
        let mut config = Config::default();
        config.upsert_profile(
            "space-cli-timeout-test",
            Profile {
                base_url: Some("https://acme.jetbrains.space".into()),
                token: Some("stored".into()),
                ..Default::default()
            },
            true,
        );

        let err = resolve_active_profile(&config, None, Some(0)).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Configuration { .. })
        ));

        if let Some(profile) = config.profiles.get_mut("space-cli-timeout-test") {
            profile.timeout_secs = Some(0);
        }
        assert!(resolve_active_profile(&config, None, None).is_err());
        assert!(resolve_active_profile(&config, None, Some(30)).is_ok());
    }
}
