use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid client configuration: {message}")]
    Configuration { message: String },

    #[error("Invalid request: {message}")]
    Validation { message: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        ApiError::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    /// True when the error was raised locally, before anything was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ApiError::Configuration { .. } | ApiError::Validation { .. }
        )
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ApiError::Configuration { .. } => {
                Some("Check the base_url and token of the active profile: space-cli auth list")
            }
            ApiError::Validation { .. } => Some("Review the command arguments"),
            ApiError::Transport(err) if err.is_timeout() => {
                Some("The request timed out; raise --timeout or check your network connection")
            }
            ApiError::Transport(_) => Some("Check your network connection and the base URL"),
            ApiError::Decode(_) => {
                Some("The server did not answer with JSON; verify the base URL points at a Space organization")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_errors() {
        assert!(ApiError::configuration("empty token").is_local());
        assert!(ApiError::validation("missing target").is_local());

        let decode = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        assert!(!ApiError::from(decode).is_local());
    }

    #[test]
    fn test_display_includes_message() {
        let err = ApiError::validation("limit must be positive");
        assert_eq!(err.to_string(), "Invalid request: limit must be positive");
    }
}
