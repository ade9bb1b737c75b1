//! Face classification enums and attribute selections

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of photo a face was taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FaceType {
    /// Everyday photo from a phone, camera or the web.
    #[default]
    Live,
    /// Portrait stored on the chip of a second-generation ID card.
    IdCard,
    /// Small ID photo carrying a watermark.
    Watermark,
    /// Photographed certificate (ID card, badge, passport).
    Cert,
    /// Photo from an infrared camera.
    Infrared,
    /// Generic face, used by liveness detection.
    Common,
}

crate::impl_wire_str_conversions!(FaceType {
    Live => "LIVE",
    IdCard => "IDCARD",
    Watermark => "WATERMARK",
    Cert => "CERT",
    Infrared => "INFRARED",
    Common => "COMMON",
});

/// Side of an ID card being recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdCardSide {
    /// Side with the portrait.
    Front,
    /// Side with the national emblem.
    Back,
}

crate::impl_wire_str_conversions!(IdCardSide {
    Front => "front",
    Back => "back",
});

/// Optional face attribute the provider can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FaceField {
    Age,
    Beauty,
    Emotion,
    Expression,
    EyeStatus,
    FaceShape,
    FaceType,
    Gender,
    Glasses,
    Landmark,
    Landmark150,
    Mask,
    Quality,
    Spoofing,
}

crate::impl_wire_str_conversions!(FaceField {
    Age => "age",
    Beauty => "beauty",
    Emotion => "emotion",
    Expression => "expression",
    EyeStatus => "eye_status",
    FaceShape => "face_shape",
    FaceType => "face_type",
    Gender => "gender",
    Glasses => "glasses",
    Landmark => "landmark",
    Landmark150 => "landmark150",
    Mask => "mask",
    Quality => "quality",
    Spoofing => "spoofing",
});

/// Set of requested face attributes, sent as a comma separated list.
///
/// Ordering follows [`FaceField`]'s declaration order so the wire string is
/// stable regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceFields(BTreeSet<FaceField>);

impl FaceFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes requested by the single and batch liveness helpers.
    pub fn liveness_defaults() -> Self {
        [FaceField::Age, FaceField::Beauty, FaceField::Spoofing].into_iter().collect()
    }

    #[must_use]
    pub fn with(mut self, field: FaceField) -> Self {
        self.0.insert(field);
        self
    }

    pub fn contains(&self, field: FaceField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = FaceField> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<FaceField> for FaceFields {
    fn from_iter<I: IntoIterator<Item = FaceField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for FaceFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for field in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for FaceFields {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<FaceField>)
            .collect()
    }
}

impl Serialize for FaceFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FaceFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
