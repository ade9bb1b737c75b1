//! Conversions from external infrastructure errors into domain errors.

use facelink_domain::FaceLinkError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FaceLinkError);

impl From<InfraError> for FaceLinkError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FaceLinkError> for InfraError {
    fn from(value: FaceLinkError) -> Self {
        InfraError(value)
    }
}

impl std::fmt::Display for InfraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for InfraError {}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoFaceLinkError {
    fn into_facelink(self) -> FaceLinkError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FaceLinkError */
/* -------------------------------------------------------------------------- */

impl IntoFaceLinkError for HttpError {
    fn into_facelink(self) -> FaceLinkError {
        if self.is_timeout() {
            return FaceLinkError::Timeout("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return FaceLinkError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return FaceLinkError::Internal(format!("failed to build HTTP request: {self}"));
        }

        if self.is_decode() {
            return FaceLinkError::Decode(format!("failed to read response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            return FaceLinkError::Vendor {
                code: code.to_string(),
                message: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
        }

        FaceLinkError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_facelink())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → FaceLinkError */
/* -------------------------------------------------------------------------- */

impl IntoFaceLinkError for JsonError {
    fn into_facelink(self) -> FaceLinkError {
        FaceLinkError::Decode(format!(
            "invalid JSON at line {} column {}: {}",
            self.line(),
            self.column(),
            self
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_facelink())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → FaceLinkError */
/* -------------------------------------------------------------------------- */

impl IntoFaceLinkError for std::io::Error {
    fn into_facelink(self) -> FaceLinkError {
        match self.kind() {
            std::io::ErrorKind::NotFound => FaceLinkError::InvalidInput(format!("file not found: {self}")),
            _ => FaceLinkError::Internal(format!("I/O failure: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_facelink())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
