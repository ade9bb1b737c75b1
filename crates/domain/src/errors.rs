//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for FaceLink
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum FaceLinkError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The provider answered but reported a failure.
    #[error("Provider error {code}: {message}")]
    Vendor { code: String, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for FaceLink operations
pub type Result<T> = std::result::Result<T, FaceLinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_error_display_includes_code() {
        let err = FaceLinkError::Vendor {
            code: "110".into(),
            message: "Access token invalid or no longer valid".into(),
        };
        assert_eq!(err.to_string(), "Provider error 110: Access token invalid or no longer valid");
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = FaceLinkError::Config("missing app key".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Config");
        assert_eq!(json["message"], "missing app key");
    }
}
