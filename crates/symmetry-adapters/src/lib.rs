//! Symmetry Adapters - External adapters for face-symmetry.
//!
//! This crate provides adapters for:
//! - Filesystem image source
//! - Image normalization (decode, EXIF orientation, resize)
//! - Landmark sidecar files written by an external detector

pub mod fs;
pub mod normalizer;
pub mod sidecar;

pub use fs::FsImageSource;
pub use normalizer::{apply_orientation, read_exif_orientation, CanonicalNormalizer};
pub use sidecar::{sidecar_path, SidecarFile, SidecarLandmarkProvider, DEFAULT_SIDECAR_SUFFIX};
