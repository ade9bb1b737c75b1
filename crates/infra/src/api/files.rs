//! Local image files

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use facelink_domain::{FaceLinkError, ImageReference};
use tracing::debug;

use super::errors::ApiError;
use crate::errors::InfraError;

/// Read a file and wrap its contents as a `BASE64` image.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] if the file does not exist and
/// [`ApiError::Config`] for other I/O failures
pub async fn read_image_file(path: impl AsRef<Path>) -> Result<ImageReference, ApiError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::from(FaceLinkError::from(InfraError::from(e))))?;

    debug!(path = %path.display(), bytes = bytes.len(), "read image file");
    Ok(ImageReference::base64(STANDARD.encode(bytes)))
}
