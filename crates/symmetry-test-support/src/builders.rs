//! Synthetic landmark, image and sidecar builders for testing.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use symmetry_core::{LandmarkSet, Point, MEDIA_PIPE_POINT_COUNT};

/// One face in normalized `[x, y]` coordinates, as written to sidecars.
pub type NormalizedFace = Vec<[f64; 2]>;

/// Builder for pixel-space landmark sets.
///
/// Starts from a full MediaPipe-sized set and overrides single points, so
/// tests only spell out the landmarks a metric looks at.
#[derive(Debug, Clone)]
pub struct SyntheticLandmarks {
    points: Vec<Point>,
}

impl SyntheticLandmarks {
    /// Every landmark at `(x, y)`. Scores 100 on every metric.
    #[must_use]
    pub fn uniform(x: i32, y: i32) -> Self {
        Self {
            points: vec![Point::new(x, y); MEDIA_PIPE_POINT_COUNT],
        }
    }

    /// Keeps only the first `count` landmarks.
    #[must_use]
    pub fn truncated(mut self, count: usize) -> Self {
        self.points.truncate(count);
        self
    }

    /// Moves landmark `index` to `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the set.
    #[must_use]
    pub fn with_point(mut self, index: usize, x: i32, y: i32) -> Self {
        self.points[index] = Point::new(x, y);
        self
    }

    /// Shifts landmark `index` by `(dx, dy)`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the set.
    #[must_use]
    pub fn with_offset(mut self, index: usize, dx: i32, dy: i32) -> Self {
        let p = &mut self.points[index];
        p.x += dx;
        p.y += dy;
        self
    }

    /// Places the 17 jaw contour points (indices 0..=16) mirrored around
    /// `midline`, `spacing` pixels apart, all on row `y`.
    #[must_use]
    pub fn with_mirrored_contour(mut self, midline: i32, spacing: i32, y: i32) -> Self {
        for (index, step) in (0..=16).zip(-8..=8) {
            self.points[index] = Point::new(midline + step * spacing, y);
        }
        self
    }

    /// Finishes the set.
    #[must_use]
    pub fn build(self) -> LandmarkSet {
        LandmarkSet::new(self.points)
    }
}

/// A normalized face with every landmark at `(x, y)`.
#[must_use]
pub fn uniform_face(x: f64, y: f64) -> NormalizedFace {
    vec![[x, y]; MEDIA_PIPE_POINT_COUNT]
}

/// Writes a landmark sidecar for `image` listing `faces`, using the default
/// `.landmarks.json` suffix. Returns the sidecar path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_sidecar(image: &Path, faces: &[NormalizedFace]) -> anyhow::Result<PathBuf> {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = image.with_file_name(format!("{stem}.landmarks.json"));
    let document = serde_json::json!({ "faces": faces });
    std::fs::write(&path, serde_json::to_vec(&document)?)?;
    Ok(path)
}

/// Builder for encoded test images.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// JPEG bytes of a solid gray image.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn jpeg(width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
        Self::encode(
            &RgbImage::from_pixel(width, height, Rgb([128, 128, 128])),
            ImageFormat::Jpeg,
        )
    }

    /// PNG bytes of a solid gray image.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn png(width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
        Self::encode(
            &RgbImage::from_pixel(width, height, Rgb([128, 128, 128])),
            ImageFormat::Png,
        )
    }

    /// JPEG bytes with a red left half and a blue right half.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn split_jpeg(width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
        let image = RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        Self::encode(&image, ImageFormat::Jpeg)
    }

    /// Inserts an EXIF block carrying `orientation` right after the JPEG SOI
    /// marker.
    ///
    /// # Errors
    ///
    /// Returns an error if `jpeg` does not start with an SOI marker.
    pub fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> anyhow::Result<Vec<u8>> {
        let Some(rest) = jpeg.strip_prefix(&[0xFF, 0xD8]) else {
            anyhow::bail!("not a JPEG stream");
        };

        let [hi, lo] = orientation.to_be_bytes();
        let mut app1 = vec![0xFF, 0xE1, 0x00, 0x22];
        app1.extend_from_slice(b"Exif\0\0");
        // Big-endian TIFF header, first IFD at offset 8
        app1.extend_from_slice(b"MM\0\x2A\0\0\0\x08");
        // One entry: Orientation (0x0112), SHORT, count 1
        app1.extend_from_slice(&[0x00, 0x01]);
        app1.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        app1.extend_from_slice(&[hi, lo, 0x00, 0x00]);
        app1.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let mut out = Vec::with_capacity(jpeg.len() + app1.len());
        out.extend_from_slice(&[0xFF, 0xD8]);
        out.extend_from_slice(&app1);
        out.extend_from_slice(rest);
        Ok(out)
    }

    /// Writes JPEG bytes of a solid gray image to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn write_jpeg(path: &Path, width: u32, height: u32) -> anyhow::Result<()> {
        std::fs::write(path, Self::jpeg(width, height)?)?;
        Ok(())
    }

    fn encode(image: &RgbImage, format: ImageFormat) -> anyhow::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image.clone()).write_to(&mut Cursor::new(&mut bytes), format)?;
        Ok(bytes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_landmarks() {
        let set = SyntheticLandmarks::uniform(3, 4).build();
        assert_eq!(set.len(), MEDIA_PIPE_POINT_COUNT);
        assert!(set.points().iter().all(|p| *p == Point::new(3, 4)));
    }

    #[test]
    fn test_point_overrides() {
        let set = SyntheticLandmarks::uniform(10, 10)
            .with_point(33, 0, 5)
            .with_offset(133, 7, -2)
            .build();
        assert_eq!(set.get(33), Some(Point::new(0, 5)));
        assert_eq!(set.get(133), Some(Point::new(17, 8)));
    }

    #[test]
    fn test_mirrored_contour() {
        let set = SyntheticLandmarks::uniform(0, 0)
            .with_mirrored_contour(150, 10, 300)
            .build();
        for k in 0..=16 {
            let (left, right) = (set.get(k).unwrap(), set.get(16 - k).unwrap());
            assert_eq!(left.x + right.x, 300);
        }
    }

    #[test]
    fn test_exif_block_is_inserted() {
        let jpeg = SyntheticImageBuilder::jpeg(4, 4).unwrap();
        let tagged = SyntheticImageBuilder::with_exif_orientation(&jpeg, 6).unwrap();

        assert_eq!(tagged.len(), jpeg.len() + 36);
        assert_eq!(&tagged[..4], &[0xFF, 0xD8, 0xFF, 0xE1]);
        assert_eq!(&tagged[6..12], b"Exif\0\0");
        assert!(image::load_from_memory(&tagged).is_ok());
    }

    #[test]
    fn test_exif_requires_jpeg() {
        let png = SyntheticImageBuilder::png(4, 4).unwrap();
        assert!(SyntheticImageBuilder::with_exif_orientation(&png, 6).is_err());
    }

    #[test]
    fn test_write_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sidecar(&dir.path().join("face.jpg"), &[vec![[0.5, 0.25]]]).unwrap();

        assert!(path.ends_with("face.landmarks.json"));
        let value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "faces": [[[0.5, 0.25]]] }));
    }
}
