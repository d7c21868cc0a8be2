//! Per-image pipeline: normalize, detect landmarks, score.

use tracing::debug;

use crate::domain::{ImageInput, LandmarkTopology, SymmetryReport};
use crate::engine::SymmetryEngine;
use crate::error::AnalysisError;
use crate::ports::{ImageNormalizer, LandmarkProvider};

/// Runs one image through normalizer, landmark provider and metric engine.
///
/// The provider is handed in already constructed; the analyzer never builds
/// or caches models itself.
pub struct SymmetryAnalyzer<N, P> {
    normalizer: N,
    provider: P,
    engine: SymmetryEngine,
}

impl<N: ImageNormalizer, P: LandmarkProvider> SymmetryAnalyzer<N, P> {
    /// Creates an analyzer from its collaborators.
    #[must_use]
    pub fn new(normalizer: N, provider: P, topology: LandmarkTopology) -> Self {
        Self {
            normalizer,
            provider,
            engine: SymmetryEngine::new(topology),
        }
    }

    /// The metric engine in use.
    #[must_use]
    pub const fn engine(&self) -> &SymmetryEngine {
        &self.engine
    }

    /// The landmark provider in use.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Analyzes one encoded image.
    ///
    /// When the provider reports several faces, the first one in provider
    /// order is scored.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be decoded or the provider fails.
    /// No face is not an error: it yields [`SymmetryReport::no_face`].
    pub fn analyze(&mut self, input: &ImageInput) -> Result<SymmetryReport, AnalysisError> {
        let frame = self.normalizer.normalize(&input.path, &input.bytes)?;
        let faces = self.provider.detect(&frame)?;

        let Some(face) = faces.first() else {
            debug!("No face detected in {}", input.path);
            return Ok(SymmetryReport::no_face());
        };

        if faces.len() > 1 {
            debug!(
                "{} faces detected in {}, scoring the first and ignoring {}",
                faces.len(),
                input.path,
                faces.len() - 1
            );
        }

        Ok(self.engine.compute(face, frame.width(), frame.height()))
    }
}
