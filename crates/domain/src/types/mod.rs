//! Domain types and models
//!
//! Image references, face enums, request payloads and result DTOs.

pub mod face;
pub mod image;
pub mod request;
pub mod result;

pub use face::{FaceField, FaceFields, FaceType, IdCardSide};
pub use image::{ImageReference, ImageType};
pub use request::{FaceDescriptor, FaceDetectRequest, FaceLiveRequest, IdCardCheckRequest};
pub use result::{
    Classification, EyeStatus, FaceAngle, FaceCheckResult, FaceDetail, FaceLiveResult,
    FaceLocation, FaceMatchResult, FaceQuality, FaceTokenRef, IdCardCheckResult, IdCardWord,
    Liveness, LivenessThresholds, Occlusion, Point, TokenResponse, WordLocation,
};
