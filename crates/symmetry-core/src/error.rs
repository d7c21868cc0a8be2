//! Error types for the analysis pipeline.

use thiserror::Error;

/// Failure to turn an image input into a symmetry report.
///
/// "No face" is not an error here: it is reported as data through
/// [`crate::SymmetryReport::no_face`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The landmark provider could not run.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failure inside a landmark provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No landmark data exists for this frame.
    #[error("no landmark data for {0}")]
    MissingLandmarks(String),

    /// Landmark data exists but cannot be read.
    #[error("malformed landmark data for {source_label}: {reason}")]
    Malformed {
        /// Frame the data belongs to.
        source_label: String,
        /// Parser message.
        reason: String,
    },

    /// The provider instance is not usable.
    #[error("landmark provider unavailable: {0}")]
    Unavailable(String),
}

/// Invalid topology configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A group that is averaged over has no indices.
    #[error("landmark group '{0}' must list at least one index")]
    EmptyGroup(&'static str),
}

/// An input rejected at the source boundary, before decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct RejectedInput {
    /// Path of the rejected input.
    pub path: String,
    /// Why it was rejected.
    pub reason: String,
}

impl RejectedInput {
    /// Creates a rejection for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
