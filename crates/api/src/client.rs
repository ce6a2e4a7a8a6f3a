use std::time::Duration;

use url::Url;

use crate::error::{ApiError, Result};

/// Page size used when neither the call nor the config sets one.
pub const DEFAULT_LIST_LIMIT: u32 = 1000;

const API_PATH: &str = "api/http";

/// Connection settings for a single Space organization.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    /// Default and maximum page size for list operations.
    pub list_limit: u32,
    /// No timeout is applied unless one is set here.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            list_limit: DEFAULT_LIST_LIMIT,
            timeout: None,
            user_agent: format!("space-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_list_limit(mut self, list_limit: u32) -> Self {
        self.list_limit = list_limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Checks the settings and derives the organization and API roots.
    pub(crate) fn resolve(&self) -> Result<ResolvedUrls> {
        let raw = self.base_url.trim();
        if raw.is_empty() {
            return Err(ApiError::configuration("base URL must not be empty"));
        }
        if self.token.trim().is_empty() {
            return Err(ApiError::configuration("token must not be empty"));
        }
        if self.list_limit == 0 {
            return Err(ApiError::configuration("list_limit must be positive"));
        }
        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(ApiError::configuration("timeout must be positive"));
        }

        let base = Url::parse(raw.trim_end_matches('/'))
            .map_err(|err| ApiError::configuration(format!("invalid base URL '{raw}': {err}")))?;

        if !matches!(base.scheme(), "http" | "https") || base.host_str().is_none() {
            return Err(ApiError::configuration(format!(
                "base URL '{raw}' must be an absolute http(s) URL"
            )));
        }

        let mut api = base.clone();
        api.path_segments_mut()
            .map_err(|_| ApiError::configuration(format!("base URL '{raw}' cannot hold a path")))?
            .pop_if_empty()
            .extend(API_PATH.split('/'));

        Ok(ResolvedUrls { base, api })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ResolvedUrls {
    pub base: Url,
    pub api: Url,
}
