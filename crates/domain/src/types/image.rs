//! Image references submitted to the provider
//!
//! The provider accepts an image in three forms and needs a discriminator
//! telling it how to read the accompanying string. Size and format limits
//! (e.g. 2 MB after base64 encoding) are enforced remotely.

use serde::{Deserialize, Serialize};

use crate::errors::{FaceLinkError, Result};

/// How the provider should interpret an image value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageType {
    /// Base64 encoded image bytes.
    Base64,
    /// Publicly reachable image URL.
    Url,
    /// Token issued by a previous face detection.
    FaceToken,
}

crate::impl_wire_str_conversions!(ImageType {
    Base64 => "BASE64",
    Url => "URL",
    FaceToken => "FACE_TOKEN",
});

impl ImageType {
    /// Form field name used by the ID-card OCR endpoint.
    ///
    /// OCR only understands raw images and URLs; face tokens have no
    /// equivalent there.
    pub fn id_card_field(self) -> Result<&'static str> {
        match self {
            Self::Base64 => Ok("image"),
            Self::Url => Ok("url"),
            Self::FaceToken => Err(FaceLinkError::InvalidInput(
                "ID-card recognition does not accept FACE_TOKEN images".into(),
            )),
        }
    }
}

/// An image value paired with its discriminator.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageReference {
    #[serde(rename = "image")]
    pub value: String,
    pub image_type: ImageType,
}

impl ImageReference {
    pub fn new(value: impl Into<String>, image_type: ImageType) -> Self {
        Self { value: value.into(), image_type }
    }

    pub fn base64(value: impl Into<String>) -> Self {
        Self::new(value, ImageType::Base64)
    }

    pub fn url(value: impl Into<String>) -> Self {
        Self::new(value, ImageType::Url)
    }

    pub fn face_token(value: impl Into<String>) -> Self {
        Self::new(value, ImageType::FaceToken)
    }
}

// Base64 payloads can be megabytes; keep them out of logs.
impl std::fmt::Debug for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self.image_type {
            ImageType::Base64 => format!("<{} base64 chars>", self.value.len()),
            ImageType::Url | ImageType::FaceToken => self.value.clone(),
        };
        f.debug_struct("ImageReference")
            .field("value", &value)
            .field("image_type", &self.image_type)
            .finish()
    }
}
