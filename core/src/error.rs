//! Error types for the ShapeShift client.
//!
//! # Design
//! Local argument problems, transport failures and undecodable bodies each
//! get their own variant so callers can decide what to retry. The remote
//! service's own `{"error": ...}` payloads are not errors here: they decode
//! to ordinary JSON and are handed back to the caller untouched.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the gateway and the endpoint wrappers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A local argument was rejected before any request was sent.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// The request could not be completed (timeout, DNS, refused connection).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body was not valid JSON.
    #[error("response (HTTP {status}) is not valid JSON: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Request parameters could not be turned into a JSON object.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ApiError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode { .. })
    }

    /// Only transport failures are worth retrying; everything else will fail
    /// the same way again.
    pub fn is_retryable(&self) -> bool {
        self.is_transport()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_errors_are_retryable() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(ApiError::Transport(refused.into()).is_retryable());
        assert!(!ApiError::Validation("bad".to_string()).is_retryable());

        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(!ApiError::Decode { status: 502, source }.is_retryable());
    }

    #[test]
    fn decode_error_message_includes_status() {
        let source = serde_json::from_str::<serde_json::Value>("oops").unwrap_err();
        let err = ApiError::Decode { status: 503, source };
        assert!(err.to_string().starts_with("response (HTTP 503) is not valid JSON"));
    }
}
