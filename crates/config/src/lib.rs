use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use space_cli_api::ClientConfig;
use tracing::debug;

/// Generic token variable, checked after the profile-specific one.
pub const TOKEN_ENV: &str = "SPACE_TOKEN";

/// Profile-specific token variable, e.g. `SPACE_CLI_TOKEN_WORK`.
pub fn profile_token_env(profile: &str) -> String {
    format!(
        "SPACE_CLI_TOKEN_{}",
        profile.to_uppercase().replace(['-', ' ', '.'], "_")
    )
}

/// Full CLI configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Config {
    /// Load configuration from the provided path or the default config file.
    /// A missing file yields an empty configuration.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(Config::default_path);

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Unable to read config file at {}", path.display()))?;

        serde_yaml::from_str(&raw)
            .with_context(|| format!("Malformed YAML in config file {}", path.display()))
    }

    /// Persist the configuration, creating parent directories if needed.
    pub fn save<P: AsRef<Path>>(&self, path: Option<P>) -> Result<()> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(Config::default_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let serialized = serde_yaml::to_string(self)?;
        fs::write(&path, serialized)
            .with_context(|| format!("Unable to write config file {}", path.display()))?;

        Ok(())
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Returns the requested profile, else the default one, else the first.
    pub fn resolve_profile<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Option<(&'a str, &'a Profile)> {
        if let Some(name) = requested {
            self.profiles.get(name).map(|profile| (name, profile))
        } else if let Some(default_name) = self.default_profile.as_deref() {
            self.profiles
                .get(default_name)
                .map(|profile| (default_name, profile))
        } else {
            self.profiles
                .iter()
                .next()
                .map(|(name, profile)| (name.as_str(), profile))
        }
    }

    /// Inserts or replaces a profile. The first profile ever added becomes
    /// the default.
    pub fn upsert_profile(&mut self, name: impl Into<String>, profile: Profile, make_default: bool) {
        let name = name.into();
        if make_default || self.default_profile.is_none() {
            self.default_profile = Some(name.clone());
        }
        self.profiles.insert(name, profile);
    }

    /// Removes a profile, clearing the default when it pointed at it.
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        let removed = self.profiles.remove(name);
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        removed
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".space-cli");
        path.push("config.yaml");
        path
    }
}

/// Connection settings for one Space organization.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Profile {
    pub base_url: Option<String>,
    /// Stored token; environment variables take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Profile {
    /// Token lookup: profile env var, then `SPACE_TOKEN`, then the stored value.
    pub fn resolve_token(&self, name: &str) -> Option<String> {
        let non_empty = |value: String| {
            let value = value.trim().to_string();
            (!value.is_empty()).then_some(value)
        };

        std::env::var(profile_token_env(name))
            .ok()
            .and_then(non_empty)
            .or_else(|| std::env::var(TOKEN_ENV).ok().and_then(non_empty))
            .or_else(|| self.token.clone().and_then(non_empty))
    }

    /// Builds client settings from this profile and an already resolved token.
    pub fn client_config(&self, name: &str, token: impl Into<String>) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .clone()
            .with_context(|| format!("Profile '{name}' is missing a base_url."))?;

        let mut config = ClientConfig::new(base_url, token);
        if let Some(limit) = self.list_limit {
            config = config.with_list_limit(limit);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
