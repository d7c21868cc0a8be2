//! Filesystem adapter for reading images.

use std::path::{Path, PathBuf};

use symmetry_core::{ImageInput, ImageSource, RejectedInput};
use tracing::{debug, warn};

/// Accepted image extensions.
const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Rejection reason for files with another extension.
pub const INVALID_FILE_TYPE: &str = "Invalid file type";

/// Rejection reason for an empty path.
pub const NO_SELECTED_FILE: &str = "No selected file";

/// Filesystem image source adapter.
///
/// Accepts JPEG files only. Files named explicitly with another extension are
/// rejected; other files found while scanning directories are ignored.
pub struct FsImageSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsImageSource {
    /// Creates a new filesystem image source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects image files and boundary rejections from the configured paths.
    fn collect_files(&self) -> Vec<Result<PathBuf, RejectedInput>> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.as_os_str().is_empty() {
                files.push(Err(RejectedInput::new("", NO_SELECTED_FILE)));
            } else if path.is_file() {
                if is_supported_image(path) {
                    files.push(Ok(path.clone()));
                } else {
                    files.push(Err(RejectedInput::new(
                        path.to_string_lossy(),
                        INVALID_FILE_TYPE,
                    )));
                }
            } else if path.is_dir() {
                let mut found = Vec::new();
                self.collect_from_dir(path, &mut found);
                found.sort();
                files.extend(found.into_iter().map(Ok));
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() {
                if is_supported_image(&path) {
                    files.push(path);
                } else {
                    debug!("Ignoring non-JPEG file: {}", path.display());
                }
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl ImageSource for FsImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInput, RejectedInput>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} candidate inputs", files.len());

        Box::new(
            files
                .into_iter()
                .map(|candidate| candidate.and_then(|path| read_image(&path))),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a JPEG extension (case-insensitive).
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| JPEG_EXTENSIONS.contains(&e.as_str()))
}

/// Reads an image file's bytes without decoding.
fn read_image(path: &Path) -> Result<ImageInput, RejectedInput> {
    let label = path.to_string_lossy().into_owned();
    match std::fs::read(path) {
        Ok(bytes) => Ok(ImageInput::new(label, bytes)),
        Err(e) => {
            let reason = format!("Failed to read image: {e}");
            Err(RejectedInput::new(label, reason))
        }
    }
}
