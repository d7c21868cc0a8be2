//! Landmark provider port.

use crate::domain::{ImageFrame, LandmarkSet};
use crate::error::ProviderError;

/// Port for detecting facial landmarks on a canonical frame.
///
/// Detection takes `&mut self`: a single instance must not run inference from
/// several threads at once. Share one instance through
/// [`crate::SharedProvider`], or hold several in a [`crate::ProviderPool`].
pub trait LandmarkProvider: Send {
    /// Detects faces and returns their landmarks in provider order.
    ///
    /// Coordinates are in pixel space of `frame`. An empty vector means no
    /// face was detected.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot produce a result for this frame.
    fn detect(&mut self, frame: &ImageFrame) -> Result<Vec<LandmarkSet>, ProviderError>;
}
