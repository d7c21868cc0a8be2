//! Image source port for reading encoded images from various sources.

use crate::domain::ImageInput;
use crate::error::RejectedInput;

/// Port for reading images from a source.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    ///
    /// # Errors
    ///
    /// Individual items are rejections when an input fails the boundary
    /// checks (file type, readability) before decoding.
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInput, RejectedInput>> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
