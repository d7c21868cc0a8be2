//! Landmark provider backed by JSON sidecar files.
//!
//! An external detector writes one sidecar next to each image:
//!
//! ```json
//! { "faces": [ [[0.41, 0.37], [0.42, 0.38], ...] ] }
//! ```
//!
//! Coordinates are normalized to `[0, 1]` and scaled to the canonical frame
//! on load. An empty `faces` list means the detector found no face.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use symmetry_core::{ImageFrame, LandmarkProvider, LandmarkSet, ProviderError};
use tracing::{debug, trace};

/// Suffix appended to the image file stem to locate its sidecar.
pub const DEFAULT_SIDECAR_SUFFIX: &str = ".landmarks.json";

/// On-disk sidecar document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidecarFile {
    /// One entry per detected face, each a list of normalized `[x, y]` pairs.
    pub faces: Vec<Vec<[f64; 2]>>,
}

/// Returns the sidecar location for an image: same directory, file stem
/// followed by `suffix`.
#[must_use]
pub fn sidecar_path(image: &Path, suffix: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    image.with_file_name(format!("{stem}{suffix}"))
}

/// Reads landmarks for a frame from its sidecar file.
#[derive(Debug, Clone)]
pub struct SidecarLandmarkProvider {
    suffix: String,
}

impl SidecarLandmarkProvider {
    /// Creates a provider looking for sidecars with `suffix`.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Suffix used to locate sidecars.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    fn load(&self, frame: &ImageFrame) -> Result<SidecarFile, ProviderError> {
        let path = sidecar_path(Path::new(&frame.source), &self.suffix);
        trace!("Reading landmarks from {}", path.display());

        let contents = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProviderError::MissingLandmarks(path.display().to_string()),
            _ => ProviderError::Unavailable(format!("{}: {e}", path.display())),
        })?;

        serde_json::from_str(&contents).map_err(|e| ProviderError::Malformed {
            source_label: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for SidecarLandmarkProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SIDECAR_SUFFIX)
    }
}

impl LandmarkProvider for SidecarLandmarkProvider {
    fn detect(&mut self, frame: &ImageFrame) -> Result<Vec<LandmarkSet>, ProviderError> {
        let sidecar = self.load(frame)?;
        debug!("{} face(s) listed for {}", sidecar.faces.len(), frame.source);

        Ok(sidecar
            .faces
            .iter()
            .map(|face| LandmarkSet::from_normalized(face, frame.width(), frame.height()))
            .collect())
    }
}
