//! Per-image inputs and analysis records.

use serde::{Deserialize, Serialize};

use super::SymmetryReport;

/// Raw image bytes as read from a source, before decoding.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Path or label of the image.
    pub path: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl ImageInput {
    /// Creates an input from a label and encoded bytes.
    #[must_use]
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// Complete result for a single image, as written by result outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Path to the analyzed image.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Scores, or the error message.
    #[serde(flatten)]
    pub report: SymmetryReport,
}

impl AnalysisRecord {
    /// Returns true if the record carries an error instead of scores.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.report.is_error()
    }
}
