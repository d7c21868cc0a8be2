//! Canonical image frames handed to the landmark provider.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Default canonical frame width in pixels.
pub const DEFAULT_FRAME_WIDTH: u32 = 310;

/// Default canonical frame height in pixels.
pub const DEFAULT_FRAME_HEIGHT: u32 = 413;

/// Canonical frame resolution, fixed for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Creates a frame size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT)
    }
}

/// A decoded, oriented, 3-channel image at the canonical resolution.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    /// Where the frame came from (file path or other label).
    pub source: String,
    /// Pixel data.
    pub image: RgbImage,
}

impl ImageFrame {
    /// Creates a frame from decoded pixels.
    #[must_use]
    pub fn new(source: impl Into<String>, image: RgbImage) -> Self {
        Self {
            source: source.into(),
            image,
        }
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Frame dimensions.
    #[must_use]
    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width(), self.height())
    }
}
