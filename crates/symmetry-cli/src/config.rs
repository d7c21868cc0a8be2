//! Configuration file support for face-symmetry.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/face-symmetry/config.toml` (lowest priority)
//! - Project-local: `.face-symmetry.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use symmetry_core::{FeaturePair, LandmarkTopology};
use tracing::{debug, info, warn};

/// File name of the project-local config.
const PROJECT_CONFIG: &str = ".face-symmetry.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Canonical frame settings.
    pub frame: FrameConfig,
    /// Landmark topology and sidecar settings.
    pub landmarks: LandmarksConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Canonical frame configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame width in pixels.
    pub width: Option<u32>,
    /// Frame height in pixels.
    pub height: Option<u32>,
}

/// Landmark index overrides. Unset groups keep the MediaPipe layout.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LandmarksConfig {
    /// Eye landmark pair (x axis).
    pub eyes: Option<FeaturePair>,
    /// Mouth-corner landmark pair (x axis).
    pub mouth: Option<FeaturePair>,
    /// Nose-width landmark pair (x axis).
    pub nose: Option<FeaturePair>,
    /// Eyebrow landmark pair (y axis).
    pub eyebrows: Option<FeaturePair>,
    /// Jaw landmark pair (y axis).
    pub jawline: Option<FeaturePair>,
    /// Nose-bridge pair defining the midline.
    pub nose_bridge: Option<FeaturePair>,
    /// Face contour indices, left to right.
    pub contour: Option<Vec<usize>>,
    /// Upper eyelid indices.
    pub eye_top: Option<Vec<usize>>,
    /// Lower eyelid indices.
    pub eye_bottom: Option<Vec<usize>>,
    /// Suffix appended to the image stem to find its landmark sidecar.
    pub sidecar_suffix: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl LandmarksConfig {
    /// The MediaPipe topology with configured groups substituted.
    pub fn topology(&self) -> LandmarkTopology {
        let mut topology = LandmarkTopology::default();

        let pairs = [
            (&mut topology.eyes, self.eyes),
            (&mut topology.mouth, self.mouth),
            (&mut topology.nose, self.nose),
            (&mut topology.eyebrows, self.eyebrows),
            (&mut topology.jawline, self.jawline),
            (&mut topology.nose_bridge, self.nose_bridge),
        ];
        for (slot, value) in pairs {
            if let Some(pair) = value {
                *slot = pair;
            }
        }

        if let Some(ref contour) = self.contour {
            topology.contour.clone_from(contour);
        }
        if let Some(ref eye_top) = self.eye_top {
            topology.eye_top.clone_from(eye_top);
        }
        if let Some(ref eye_bottom) = self.eye_bottom {
            topology.eye_bottom.clone_from(eye_bottom);
        }

        topology
    }
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/face-symmetry/config.toml`
    /// 2. Project-local: `.face-symmetry.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if self.frame.width == Some(0) || self.frame.height == Some(0) {
            return Err("frame.width and frame.height must be positive".into());
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        if let Err(e) = self.landmarks.topology().validate() {
            return Err(format!("landmarks: {e}"));
        }

        if self
            .landmarks
            .sidecar_suffix
            .as_deref()
            .is_some_and(str::is_empty)
        {
            return Err("landmarks.sidecar_suffix must not be empty".into());
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Frame
        self.frame.width = other.frame.width.or(self.frame.width);
        self.frame.height = other.frame.height.or(self.frame.height);

        // Landmarks
        let ours = &mut self.landmarks;
        let theirs = other.landmarks;
        ours.eyes = theirs.eyes.or(ours.eyes);
        ours.mouth = theirs.mouth.or(ours.mouth);
        ours.nose = theirs.nose.or(ours.nose);
        ours.eyebrows = theirs.eyebrows.or(ours.eyebrows);
        ours.jawline = theirs.jawline.or(ours.jawline);
        ours.nose_bridge = theirs.nose_bridge.or(ours.nose_bridge);
        ours.contour = theirs.contour.or_else(|| ours.contour.take());
        ours.eye_top = theirs.eye_top.or_else(|| ours.eye_top.take());
        ours.eye_bottom = theirs.eye_bottom.or_else(|| ours.eye_bottom.take());
        ours.sidecar_suffix = theirs
            .sidecar_suffix
            .or_else(|| ours.sidecar_suffix.take());

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("face-symmetry").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.face-symmetry.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.frame.width.is_none());
        assert!(config.output.format.is_none());
        assert_eq!(config.landmarks.topology(), LandmarkTopology::media_pipe());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.general.recursive.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true

[frame]
width = 200
height = 300

[landmarks]
eyes = [1, 2]
contour = [0, 1, 2, 3]
eye_top = [5]
sidecar_suffix = '.faces.json'

[output]
format = 'json'
pretty = true
progress = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");
        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(config.frame.width, Some(200));
        assert_eq!(config.frame.height, Some(300));
        assert_eq!(config.landmarks.sidecar_suffix.as_deref(), Some(".faces.json"));
        assert_eq!(config.output.format.as_deref(), Some("json"));
        assert_eq!(config.output.pretty, Some(true));

        let topology = config.landmarks.topology();
        assert_eq!(topology.eyes, FeaturePair(1, 2));
        assert_eq!(topology.contour, vec![0, 1, 2, 3]);
        assert_eq!(topology.eye_top, vec![5]);
        // Unset groups keep the default layout
        assert_eq!(topology.mouth, FeaturePair(62, 314));
        assert_eq!(topology.eye_bottom, vec![40, 41, 46, 47]);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base: AppConfig = toml::from_str(
            r"
[frame]
width = 100
height = 100

[landmarks]
eyes = [1, 2]

[output]
format = 'json'
",
        )
        .unwrap();
        let project: AppConfig = toml::from_str(
            r"
[frame]
width = 640

[output]
format = 'jsonl'
",
        )
        .unwrap();

        base.merge(project);

        assert_eq!(base.frame.width, Some(640));
        assert_eq!(base.frame.height, Some(100));
        assert_eq!(base.landmarks.eyes, Some(FeaturePair(1, 2)));
        assert_eq!(base.output.format.as_deref(), Some("jsonl"));
    }

    #[test]
    fn test_validate_rejects_zero_frame() {
        let config: AppConfig = toml::from_str("[frame]\nwidth = 0").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("frame.width"));
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let config: AppConfig = toml::from_str("[output]\nformat = 'xml'").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("output.format"));
    }

    #[test]
    fn test_validate_rejects_empty_group() {
        let config: AppConfig = toml::from_str("[landmarks]\ncontour = []").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("contour"));
    }

    #[test]
    fn test_find_config_in_parents() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(PROJECT_CONFIG), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, root.path().join(PROJECT_CONFIG));
    }

    #[test]
    fn test_load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[frame\nwidth = ").unwrap();
        assert!(load_file(&path).is_none());
    }
}
