//! Result payloads returned by the provider
//!
//! These mirror the provider's JSON field for field. Every field is optional or
//! defaulted: the provider omits attributes that were not requested, and
//! anything it leaves out stays empty here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Bounding box of a detected face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceLocation {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: i32,
}

/// Head pose in degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceAngle {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Categorical attribute (`expression`, `gender`, `glasses`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    #[serde(rename = "type")]
    pub kind: String,
    pub probability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeStatus {
    pub left_eye: f64,
    pub right_eye: f64,
}

/// Per-region occlusion ratios, 0 means fully visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Occlusion {
    pub left_eye: f64,
    pub right_eye: f64,
    pub nose: f64,
    pub mouth: f64,
    pub left_cheek: f64,
    pub right_cheek: f64,
    pub chin_contour: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceQuality {
    pub occlusion: Occlusion,
    pub blur: f64,
    pub illumination: f64,
    pub completeness: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Liveness {
    pub livemapscore: f64,
}

/// One face as reported by detection or liveness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceDetail {
    pub face_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<FaceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<FaceAngle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liveness: Option<Liveness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beauty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoofing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_shape: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glasses: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_type: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_status: Option<EyeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<FaceQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<Vec<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark72: Option<Vec<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark150: Option<BTreeMap<String, Point>>,
}

/// Result of face detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceCheckResult {
    pub face_num: u32,
    pub face_list: Vec<FaceDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceTokenRef {
    pub face_token: String,
}

/// Result of face comparison. `score` ranges from 0 to 100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceMatchResult {
    pub score: f64,
    pub face_list: Vec<FaceTokenRef>,
}

/// Score cut-offs at false rejection rates of 1e-4, 1e-3 and 1e-2.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessThresholds {
    #[serde(rename = "frr_1e-4")]
    pub frr_1e_4: f64,
    #[serde(rename = "frr_1e-3")]
    pub frr_1e_3: f64,
    #[serde(rename = "frr_1e-2")]
    pub frr_1e_2: f64,
}

/// Result of liveness detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceLiveResult {
    pub face_liveness: f64,
    pub thresholds: LivenessThresholds,
    pub face_list: Vec<FaceDetail>,
}

impl FaceLiveResult {
    /// True when the liveness score clears the given threshold.
    pub fn passes(&self, threshold: f64) -> bool {
        self.face_liveness >= threshold
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordLocation {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// One recognised ID-card field (name, address, expiry date, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdCardWord {
    pub location: WordLocation,
    pub words: String,
}

/// Result of ID-card recognition.
///
/// `idcard_number_type` cross-checks the card number against sex and birth
/// date:
/// -1 no front fields, 0 number misread, 1 consistent, 2 both inconsistent,
/// 3 birth date inconsistent, 4 sex inconsistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdCardCheckResult {
    pub log_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idcard_number_type: Option<i32>,
    pub words_result_num: u32,
    pub words_result: BTreeMap<String, IdCardWord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_location: Option<WordLocation>,
}

impl IdCardCheckResult {
    /// Recognised text for a field such as `"姓名"` or `"失效日期"`.
    pub fn word(&self, field: &str) -> Option<&str> {
        self.words_result.get(field).map(|word| word.words.as_str())
    }
}

/// Credential exchange response. Returned directly, without an envelope.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub session_key: Option<String>,
    pub session_secret: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
