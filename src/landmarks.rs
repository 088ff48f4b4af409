//! The 68-point landmark scheme: named feature groups, gestures, and head orientation.
//!
//! Index layout:
//! - Jaw: 0-16
//! - Eyebrows: 17-21 (left in image), 22-26 (right in image)
//! - Nose bridge: 27-30, nose base: 31-35
//! - Eyes: 36-41 (left in image), 42-47 (right in image)
//! - Outer mouth: 48-59, inner mouth: 60-67

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Number of landmarks in the standard scheme.
pub const NUM_LANDMARKS: usize = 68;

pub const LEFT_MOUTH_CORNER: usize = 48;
pub const RIGHT_MOUTH_CORNER: usize = 54;
pub const LEFT_NOSTRIL_ANCHOR: usize = 4;
pub const RIGHT_NOSTRIL_ANCHOR: usize = 12;

/// Eye corner and upper-lid landmarks, ordered outer-to-inner along the lid.
pub const LEFT_EYE_LID: [usize; 4] = [36, 37, 38, 39];
pub const RIGHT_EYE_LID: [usize; 4] = [42, 43, 44, 45];

/// A named anatomical curve of the landmark scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    LeftJaw,
    RightJaw,
    Jaw,
    LeftEyebrow,
    RightEyebrow,
    NoseBridge,
    NoseBase,
    LeftEye,
    RightEye,
    LeftEyeTop,
    RightEyeTop,
    OuterMouth,
    InnerMouth,
}

impl Feature {
    pub const ALL: [Feature; 13] = [
        Feature::LeftJaw,
        Feature::RightJaw,
        Feature::Jaw,
        Feature::LeftEyebrow,
        Feature::RightEyebrow,
        Feature::NoseBridge,
        Feature::NoseBase,
        Feature::LeftEye,
        Feature::RightEye,
        Feature::LeftEyeTop,
        Feature::RightEyeTop,
        Feature::OuterMouth,
        Feature::InnerMouth,
    ];

    pub fn indices(&self) -> RangeInclusive<usize> {
        match self {
            Feature::LeftJaw => 0..=8,
            Feature::RightJaw => 8..=16,
            Feature::Jaw => 0..=16,
            Feature::LeftEyebrow => 17..=21,
            Feature::RightEyebrow => 22..=26,
            Feature::NoseBridge => 27..=30,
            Feature::NoseBase => 31..=35,
            Feature::LeftEye => 36..=41,
            Feature::RightEye => 42..=47,
            Feature::LeftEyeTop => 36..=39,
            Feature::RightEyeTop => 42..=45,
            Feature::OuterMouth => 48..=59,
            Feature::InnerMouth => 60..=67,
        }
    }

    /// Eye and mouth outlines are loops; everything else is an open curve.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            Feature::LeftEye | Feature::RightEye | Feature::OuterMouth | Feature::InnerMouth
        )
    }
}

/// Scalar facial measurements reported by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gesture {
    MouthWidth,
    MouthHeight,
    LeftEyebrowHeight,
    RightEyebrowHeight,
    LeftEyeOpenness,
    RightEyeOpenness,
    JawOpenness,
    NostrilFlare,
}

impl Gesture {
    /// The landmark pair whose separation defines this gesture.
    pub fn landmark_pair(&self) -> (usize, usize) {
        match self {
            Gesture::MouthWidth => (48, 54),
            Gesture::MouthHeight => (62, 66),
            Gesture::LeftEyebrowHeight => (19, 37),
            Gesture::RightEyebrowHeight => (24, 44),
            Gesture::LeftEyeOpenness => (37, 41),
            Gesture::RightEyeOpenness => (43, 47),
            Gesture::JawOpenness => (8, 33),
            Gesture::NostrilFlare => (31, 35),
        }
    }
}

/// Head orientation in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Orientation {
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}
