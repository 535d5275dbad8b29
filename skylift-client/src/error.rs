//! Error types for the Skylift client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling the cloud APIs
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider reported an error, either as an embedded
    /// `{error: {code, message}}` envelope or as a non-2xx status
    #[error("remote error (code {code}): {message}")]
    Remote {
        /// Provider error code; matches the HTTP status for status-level
        /// failures
        code: i64,
        /// Error message from the provider
        message: String,
    },

    /// The response body was not the JSON we expected
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Create a remote error from code and message
    pub fn remote(code: i64, message: impl Into<String>) -> Self {
        Self::Remote {
            code,
            message: message.into(),
        }
    }

    /// Check if this error is an "already exists" conflict (409)
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Remote { code: 409, .. })
    }

    /// Check if this error is a "not found" error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote { code: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_predicate() {
        assert!(ClientError::remote(409, "already exists").is_conflict());
        assert!(!ClientError::remote(403, "denied").is_conflict());
        assert!(!ClientError::remote(409, "already exists").is_not_found());
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(ClientError::remote(404, "no such service").is_not_found());
        assert!(!ClientError::remote(500, "boom").is_not_found());
    }
}
