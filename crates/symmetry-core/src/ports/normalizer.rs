//! Image normalizer port.

use crate::domain::{FrameSize, ImageFrame};
use crate::error::AnalysisError;

/// Port for turning encoded bytes into a canonical frame.
///
/// Implementations decode the bytes, correct orientation from embedded
/// metadata, drop any alpha channel, and resize to [`Self::frame_size`].
pub trait ImageNormalizer: Send + Sync {
    /// The canonical resolution every frame is resized to.
    fn frame_size(&self) -> FrameSize;

    /// Decodes and normalizes one image.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Decode`] if the bytes are not a decodable image.
    fn normalize(&self, source: &str, bytes: &[u8]) -> Result<ImageFrame, AnalysisError>;
}
