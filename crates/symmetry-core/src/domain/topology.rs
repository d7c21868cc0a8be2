//! Landmark topology: which landmark indices name which facial features.
//!
//! The engine never hard-codes indices. A topology is injected instead, so the
//! same metrics run on any landmark model once its index layout is described.

use serde::{Deserialize, Serialize};

use crate::error::TopologyError;

/// Number of points produced by the MediaPipe Face Mesh model.
pub const MEDIA_PIPE_POINT_COUNT: usize = 468;

/// Two landmark indices compared against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePair(pub usize, pub usize);

impl FeaturePair {
    /// First index of the pair.
    #[must_use]
    pub const fn first(self) -> usize {
        self.0
    }

    /// Second index of the pair.
    #[must_use]
    pub const fn second(self) -> usize {
        self.1
    }
}

/// Feature-to-index mapping for one landmark detection model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkTopology {
    /// Eye landmarks compared on the x axis.
    pub eyes: FeaturePair,
    /// Mouth-corner landmarks compared on the x axis.
    pub mouth: FeaturePair,
    /// Nose-width landmarks compared on the x axis.
    pub nose: FeaturePair,
    /// Eyebrow landmarks compared on the y axis.
    pub eyebrows: FeaturePair,
    /// Jaw landmarks compared on the y axis.
    pub jawline: FeaturePair,
    /// Nose-bridge landmarks whose mean x defines the midline.
    pub nose_bridge: FeaturePair,
    /// Face contour, left to right; entry `k` mirrors entry `len - 1 - k`.
    pub contour: Vec<usize>,
    /// Upper eyelid landmarks.
    pub eye_top: Vec<usize>,
    /// Lower eyelid landmarks.
    pub eye_bottom: Vec<usize>,
}

impl LandmarkTopology {
    /// Index layout for the 468-point MediaPipe Face Mesh.
    #[must_use]
    pub fn media_pipe() -> Self {
        Self {
            eyes: FeaturePair(33, 133),
            mouth: FeaturePair(62, 314),
            nose: FeaturePair(31, 35),
            eyebrows: FeaturePair(21, 22),
            jawline: FeaturePair(5, 11),
            nose_bridge: FeaturePair(27, 30),
            contour: (0..=16).collect(),
            eye_top: vec![37, 38, 43, 44],
            eye_bottom: vec![40, 41, 46, 47],
        }
    }

    /// Every index referenced by this topology.
    fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        [
            self.eyes,
            self.mouth,
            self.nose,
            self.eyebrows,
            self.jawline,
            self.nose_bridge,
        ]
        .into_iter()
        .flat_map(|pair| [pair.0, pair.1])
        .chain(self.contour.iter().copied())
        .chain(self.eye_top.iter().copied())
        .chain(self.eye_bottom.iter().copied())
    }

    /// Minimum number of landmarks a set needs to be scored with this topology.
    #[must_use]
    pub fn required_points(&self) -> usize {
        self.indices().max().map_or(0, |max| max + 1)
    }

    /// Checks that every averaged group has at least one index.
    ///
    /// # Errors
    ///
    /// Returns the first empty group found.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.contour.is_empty() {
            return Err(TopologyError::EmptyGroup("contour"));
        }
        if self.eye_top.is_empty() {
            return Err(TopologyError::EmptyGroup("eye_top"));
        }
        if self.eye_bottom.is_empty() {
            return Err(TopologyError::EmptyGroup("eye_bottom"));
        }
        Ok(())
    }
}

impl Default for LandmarkTopology {
    fn default() -> Self {
        Self::media_pipe()
    }
}
