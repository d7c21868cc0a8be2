//! Canonical frame normalizer.
//!
//! Decodes encoded bytes, applies EXIF orientation, drops alpha and resizes
//! to the configured frame size. Landmark coordinates only compare across
//! images when every image goes through the same frame.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::DynamicImage;
use symmetry_core::{AnalysisError, FrameSize, ImageFrame, ImageNormalizer};
use tracing::{debug, trace};

/// EXIF orientation meaning "already upright".
const ORIENTATION_NORMAL: u32 = 1;

/// Normalizer producing frames at a fixed resolution.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalNormalizer {
    size: FrameSize,
    filter: FilterType,
}

impl CanonicalNormalizer {
    /// Creates a normalizer resizing to `size`.
    #[must_use]
    pub const fn new(size: FrameSize) -> Self {
        Self {
            size,
            filter: FilterType::CatmullRom,
        }
    }

    /// Overrides the resampling filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for CanonicalNormalizer {
    fn default() -> Self {
        Self::new(FrameSize::default())
    }
}

impl ImageNormalizer for CanonicalNormalizer {
    fn frame_size(&self) -> FrameSize {
        self.size
    }

    fn normalize(&self, source: &str, bytes: &[u8]) -> Result<ImageFrame, AnalysisError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| AnalysisError::Decode(e.to_string()))?;
        trace!(
            "Decoded {source}: {}x{}",
            decoded.width(),
            decoded.height()
        );

        let orientation = read_exif_orientation(bytes);
        let oriented = if orientation == ORIENTATION_NORMAL {
            decoded
        } else {
            debug!("Applying EXIF orientation {orientation} to {source}");
            apply_orientation(decoded, orientation)
        };

        let rgb = oriented.to_rgb8();
        let resized = imageops::resize(&rgb, self.size.width, self.size.height, self.filter);

        Ok(ImageFrame::new(source, resized))
    }
}

/// Reads the EXIF orientation tag from encoded bytes.
///
/// Returns 1 (upright) when there is no EXIF block or no orientation tag.
#[must_use]
pub fn read_exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
        return ORIENTATION_NORMAL;
    };

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(ORIENTATION_NORMAL)
}

/// Rotates or mirrors an image so that an EXIF `orientation` becomes upright.
///
/// Unknown values leave the image untouched.
#[must_use]
pub fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_resizes_to_frame() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 32, Rgb([10, 20, 30])));
        let bytes = encode(&image, ImageFormat::Png);

        let frame = CanonicalNormalizer::default()
            .normalize("face.png", &bytes)
            .unwrap();

        assert_eq!(frame.width(), 310);
        assert_eq!(frame.height(), 413);
        assert_eq!(frame.source, "face.png");
    }

    #[test]
    fn test_alpha_is_dropped() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([200, 0, 0, 128])));
        let bytes = encode(&image, ImageFormat::Png);

        let frame = CanonicalNormalizer::new(FrameSize::new(4, 4))
            .normalize("alpha.png", &bytes)
            .unwrap();

        let pixel = frame.image.get_pixel(0, 0);
        assert!(pixel[0] >= 195, "{pixel:?}");
        assert!(pixel[1] <= 5, "{pixel:?}");
    }

    #[test]
    fn test_nearest_filter_keeps_exact_colors() {
        let mut rgb = RgbImage::from_pixel(2, 1, Rgb([0, 0, 255]));
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        let bytes = encode(&DynamicImage::ImageRgb8(rgb), ImageFormat::Png);

        let frame = CanonicalNormalizer::new(FrameSize::new(4, 1))
            .with_filter(FilterType::Nearest)
            .normalize("split.png", &bytes)
            .unwrap();

        assert_eq!(frame.image.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(frame.image.get_pixel(1, 0), &Rgb([255, 0, 0]));
        assert_eq!(frame.image.get_pixel(2, 0), &Rgb([0, 0, 255]));
        assert_eq!(frame.image.get_pixel(3, 0), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_undecodable_bytes() {
        let result = CanonicalNormalizer::default().normalize("broken.jpg", b"not an image");
        assert!(matches!(result, Err(AnalysisError::Decode(_))));
    }

    #[test]
    fn test_orientation_defaults_to_upright() {
        assert_eq!(read_exif_orientation(b"no exif here"), 1);

        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        assert_eq!(read_exif_orientation(&encode(&image, ImageFormat::Jpeg)), 1);
    }

    #[test]
    fn test_apply_orientation_dimensions() {
        let image = || DynamicImage::ImageRgb8(RgbImage::new(10, 20));

        for orientation in [1, 2, 3, 4, 9] {
            let out = apply_orientation(image(), orientation);
            assert_eq!((out.width(), out.height()), (10, 20), "orientation {orientation}");
        }
        for orientation in [5, 6, 7, 8] {
            let out = apply_orientation(image(), orientation);
            assert_eq!((out.width(), out.height()), (20, 10), "orientation {orientation}");
        }
    }

    #[test]
    fn test_rotate90_moves_left_edge_to_top() {
        let mut rgb = RgbImage::from_pixel(2, 1, Rgb([0, 0, 255]));
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));

        let out = apply_orientation(DynamicImage::ImageRgb8(rgb), 6).to_rgb8();

        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(0, 1), &Rgb([0, 0, 255]));
    }
}
