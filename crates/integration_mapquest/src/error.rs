//! MapQuest error types

use thiserror::Error;

use crate::models::Info;

/// Errors that can occur while talking to MapQuest
///
/// Three families stay distinguishable: transport failures
/// ([`is_transport`](Self::is_transport)), undecodable payloads
/// ([`is_decode`](Self::is_decode)) and errors reported by the provider
/// itself ([`is_provider`](Self::is_provider)).
#[derive(Debug, Error)]
pub enum MapQuestError {
    /// Connection to MapQuest failed or the body could not be read
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The configured timeout in seconds
        timeout_secs: u64,
    },

    /// Non-success HTTP status without a provider status block
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body is not the expected JSON
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// MapQuest answered with a non-zero status code
    #[error("{0}")]
    Provider(Info),

    /// The request cannot be sent as built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client configuration is unusable
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl MapQuestError {
    /// True for connection, timeout and HTTP status failures
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RequestFailed(_)
        )
    }

    /// True when the payload could not be decoded
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }

    /// True when MapQuest reported the failure
    #[must_use]
    pub const fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Provider status code, for provider errors only
    #[must_use]
    pub const fn status_code(&self) -> Option<i32> {
        match self {
            Self::Provider(info) => Some(info.statuscode),
            _ => None,
        }
    }

    /// Provider info block, for provider errors only
    #[must_use]
    pub const fn info(&self) -> Option<&Info> {
        match self {
            Self::Provider(info) => Some(info),
            _ => None,
        }
    }
}

impl From<Info> for MapQuestError {
    fn from(info: Info) -> Self {
        Self::Provider(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_failure() -> Info {
        Info::new(
            400,
            vec!["We are unable to route with the given locations.".to_string()],
        )
    }

    #[test]
    fn test_provider_error_display() {
        let err = MapQuestError::from(route_failure());
        assert_eq!(
            err.to_string(),
            "Error 400: We are unable to route with the given locations."
        );
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(err.info().map(|i| i.messages.len()), Some(1));
    }

    #[test]
    fn test_error_kinds() {
        let provider = MapQuestError::Provider(route_failure());
        assert!(provider.is_provider());
        assert!(!provider.is_transport());
        assert!(!provider.is_decode());

        let decode = MapQuestError::from(serde_json::from_str::<Info>("nope").unwrap_err());
        assert!(decode.is_decode());
        assert!(!decode.is_transport());
        assert_eq!(decode.status_code(), None);

        assert!(MapQuestError::ConnectionFailed("refused".to_string()).is_transport());
        assert!(MapQuestError::RequestFailed("HTTP 500".to_string()).is_transport());
        assert!(MapQuestError::Timeout { timeout_secs: 5 }.is_transport());

        let invalid = MapQuestError::InvalidRequest("no destination".to_string());
        assert!(!invalid.is_transport() && !invalid.is_decode() && !invalid.is_provider());
    }

    #[test]
    fn test_error_display() {
        let err = MapQuestError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));

        let err = MapQuestError::RequestFailed("HTTP 503".to_string());
        assert_eq!(err.to_string(), "Request failed: HTTP 503");
    }
}
