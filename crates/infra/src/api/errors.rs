//! API-specific error types
//!
//! Classifies client failures into transport, provider, deserialization and
//! configuration errors. Nothing here is retried.

use facelink_domain::FaceLinkError;
use thiserror::Error;

/// Provider codes meaning the access token is invalid or expired.
const TOKEN_REJECTED_CODES: [&str; 2] = ["110", "111"];

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Connection failures and timeouts
    Transport,
    /// The provider reported an error (envelope code or HTTP status)
    Provider,
    /// The response did not have the expected shape
    Deserialization,
    /// Missing token, bad credentials or unusable input
    Configuration,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Provider error {code}: {message}")]
    Vendor { code: String, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Transport,
            Self::Vendor { .. } => ApiErrorCategory::Provider,
            Self::Decode(_) => ApiErrorCategory::Deserialization,
            Self::Auth(_) | Self::Config(_) | Self::InvalidInput(_) => {
                ApiErrorCategory::Configuration
            }
        }
    }

    /// Provider error code, if the provider reported one.
    pub fn vendor_code(&self) -> Option<&str> {
        match self {
            Self::Vendor { code, .. } => Some(code),
            _ => None,
        }
    }

    /// True when the provider rejected the access token.
    pub fn is_token_rejected(&self) -> bool {
        self.vendor_code().is_some_and(|code| TOKEN_REJECTED_CODES.contains(&code))
    }
}

impl From<FaceLinkError> for ApiError {
    fn from(err: FaceLinkError) -> Self {
        match err {
            FaceLinkError::Network(message) => Self::Network(message),
            FaceLinkError::Timeout(message) => Self::Timeout(message),
            FaceLinkError::Vendor { code, message } => Self::Vendor { code, message },
            FaceLinkError::Decode(message) => Self::Decode(message),
            FaceLinkError::Auth(message) => Self::Auth(message),
            // Request construction failures are local setup problems.
            FaceLinkError::Config(message) | FaceLinkError::Internal(message) => {
                Self::Config(message)
            }
            FaceLinkError::InvalidInput(message) => Self::InvalidInput(message),
        }
    }
}

impl From<ApiError> for FaceLinkError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(message) => Self::Network(message),
            ApiError::Timeout(message) => Self::Timeout(message),
            ApiError::Vendor { code, message } => Self::Vendor { code, message },
            ApiError::Decode(message) => Self::Decode(message),
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::InvalidInput(message) => Self::InvalidInput(message),
        }
    }
}
