//! Request payloads sent to the provider
//!
//! Field names and value encodings follow the provider's wire contract exactly.

use serde::{Deserialize, Serialize};

use super::face::{FaceFields, FaceType, IdCardSide};
use super::image::{ImageReference, ImageType};
use crate::constants::MAX_FACE_NUM;
use crate::errors::Result;

/// JSON body for face detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceDetectRequest<'a> {
    pub image_type: ImageType,
    pub max_face_num: &'static str,
    pub image: &'a str,
}

impl<'a> FaceDetectRequest<'a> {
    pub fn new(image: &'a ImageReference) -> Self {
        Self { image_type: image.image_type, max_face_num: MAX_FACE_NUM, image: &image.value }
    }
}

/// One side of a face comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceDescriptor {
    #[serde(flatten)]
    pub image: ImageReference,
    #[serde(default)]
    pub face_type: FaceType,
}

impl FaceDescriptor {
    /// Descriptor for an everyday photo (`LIVE`).
    pub fn new(image: ImageReference) -> Self {
        Self { image, face_type: FaceType::default() }
    }

    #[must_use]
    pub fn with_face_type(mut self, face_type: FaceType) -> Self {
        self.face_type = face_type;
        self
    }
}

/// One face submitted for liveness detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceLiveRequest {
    #[serde(flatten)]
    pub image: ImageReference,
    pub face_field: FaceFields,
    #[serde(default)]
    pub face_type: FaceType,
}

impl FaceLiveRequest {
    pub fn new(image: ImageReference, face_field: FaceFields, face_type: FaceType) -> Self {
        Self { image, face_field, face_type }
    }

    /// Request with `age,beauty,spoofing` attributes and the `COMMON` face type.
    pub fn with_defaults(image: ImageReference) -> Self {
        Self::new(image, FaceFields::liveness_defaults(), FaceType::Common)
    }
}

/// Form body for ID-card recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCardCheckRequest<'a> {
    pub image: &'a ImageReference,
    pub side: IdCardSide,
}

impl<'a> IdCardCheckRequest<'a> {
    pub fn new(image: &'a ImageReference, side: IdCardSide) -> Self {
        Self { image, side }
    }

    /// Ordered form fields. Risk and portrait detection are always requested.
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>> {
        let image_key = self.image.image_type.id_card_field()?;
        Ok(vec![
            ("id_card_side", self.side.as_str().to_string()),
            ("detect_risk", "true".to_string()),
            ("detect_photo", "true".to_string()),
            (image_key, self.image.value.clone()),
        ])
    }
}
