//! Symmetry report types.

use serde::{Deserialize, Serialize};

/// Message carried by the report when no face was found.
pub const NO_FACE_MESSAGE: &str = "No face detected";

/// The seven symmetry metrics and their mean, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetryScores {
    /// Horizontal alignment of the two eye landmarks.
    pub eyes: f64,
    /// Horizontal alignment of the two mouth landmarks.
    pub mouth: f64,
    /// Horizontal alignment of the two nose-width landmarks.
    pub nose: f64,
    /// Vertical alignment of the two eyebrow landmarks.
    pub eyebrows: f64,
    /// Vertical alignment of the two jaw landmarks.
    pub jawline: f64,
    /// Mirror symmetry of the face contour about the nose-bridge midline.
    pub vertical_symmetry: f64,
    /// Eye opening: distance between mean eyelid-top and eyelid-bottom rows.
    pub horizontal_symmetry: f64,
    /// Unweighted mean of the seven metrics above.
    pub overall: f64,
}

impl SymmetryScores {
    /// The seven individual metrics, by name, in report order.
    #[must_use]
    pub const fn metrics(&self) -> [(&'static str, f64); 7] {
        [
            ("eyes", self.eyes),
            ("mouth", self.mouth),
            ("nose", self.nose),
            ("eyebrows", self.eyebrows),
            ("jawline", self.jawline),
            ("vertical_symmetry", self.vertical_symmetry),
            ("horizontal_symmetry", self.horizontal_symmetry),
        ]
    }
}

/// Outcome of scoring one face: either scores or an error message, never both.
///
/// Serializes flat, so consumers can branch on the presence of an `error` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymmetryReport {
    /// All metrics were computed.
    Scores(SymmetryScores),
    /// Scoring was not possible.
    Error {
        /// Human-readable reason.
        error: String,
    },
}

impl SymmetryReport {
    /// Creates an error report.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// The report produced when the provider found no face.
    #[must_use]
    pub fn no_face() -> Self {
        Self::error(NO_FACE_MESSAGE)
    }

    /// Returns true for the error shape.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Scores, if computed.
    #[must_use]
    pub const fn scores(&self) -> Option<&SymmetryScores> {
        match self {
            Self::Scores(scores) => Some(scores),
            Self::Error { .. } => None,
        }
    }

    /// Error message, if scoring failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Scores(_) => None,
            Self::Error { error } => Some(error),
        }
    }
}

impl From<SymmetryScores> for SymmetryReport {
    fn from(scores: SymmetryScores) -> Self {
        Self::Scores(scores)
    }
}
