//! Analyze command - score facial symmetry for images.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use symmetry_adapters::{
    CanonicalNormalizer, FsImageSource, SidecarLandmarkProvider, DEFAULT_SIDECAR_SUFFIX,
};
use symmetry_core::{
    AnalysisRecord, FrameSize, ImageNormalizer, ImageSource, LandmarkProvider, LandmarkTopology,
    ProgressEvent, ProgressSink, ResultOutput, SymmetryAnalyzer, SymmetryReport,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Shared arguments for image analysis.
#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Canonical frame width in pixels
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    pub frame_width: Option<u32>,

    /// Canonical frame height in pixels
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    pub frame_height: Option<u32>,

    /// Suffix appended to the image stem to find its landmark sidecar
    #[arg(long, value_name = "SUFFIX")]
    pub landmarks_suffix: Option<String>,

    /// Topology from config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    topology: Option<LandmarkTopology>,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Zero sizes and empty suffixes are reported by config validation and ignored here
        args.frame_width = args
            .frame_width
            .or(config.frame.width.filter(|w| *w > 0));
        args.frame_height = args
            .frame_height
            .or(config.frame.height.filter(|h| *h > 0));
        args.landmarks_suffix = args.landmarks_suffix.or_else(|| {
            config
                .landmarks
                .sidecar_suffix
                .clone()
                .filter(|s| !s.is_empty())
        });

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.topology = Some(config.landmarks.topology());

        args
    }

    /// Canonical frame size with fallback to the default resolution.
    fn frame_size(&self) -> FrameSize {
        let default = FrameSize::default();
        FrameSize::new(
            self.frame_width.unwrap_or(default.width),
            self.frame_height.unwrap_or(default.height),
        )
    }

    /// Sidecar suffix with fallback to `.landmarks.json`.
    fn landmarks_suffix(&self) -> &str {
        self.landmarks_suffix
            .as_deref()
            .unwrap_or(DEFAULT_SIDECAR_SUFFIX)
    }

    /// Topology from config, or the MediaPipe layout.
    fn topology(&self) -> LandmarkTopology {
        self.topology.clone().unwrap_or_default()
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the analyze command.
#[derive(Debug)]
#[allow(dead_code)] // Counts exposed for programmatic use
pub struct AnalyzeResult {
    /// Number of images run through the analyzer.
    pub processed: usize,
    /// Number of inputs rejected before analysis.
    pub skipped: usize,
    /// Number of error records written (rejections included).
    pub errors: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    info!("Running analyze command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let topology = args.topology();
    topology
        .validate()
        .context("Invalid landmark topology")?;

    let frame_size = args.frame_size();
    debug!(
        "Canonical frame {}x{}, sidecar suffix {}",
        frame_size.width,
        frame_size.height,
        args.landmarks_suffix()
    );

    let mut analyzer = SymmetryAnalyzer::new(
        CanonicalNormalizer::new(frame_size),
        SidecarLandmarkProvider::new(args.landmarks_suffix()),
        topology,
    );

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = match args.format() {
        OutputFormat::Jsonl => JsonOutput::lines(),
        OutputFormat::Json => JsonOutput::array(args.pretty),
    };

    process_images(&source, &mut analyzer, &output, &progress_bar)
}

/// Run every input through the analyzer and write one record per input.
fn process_images<N, P>(
    source: &dyn ImageSource,
    analyzer: &mut SymmetryAnalyzer<N, P>,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
) -> Result<AnalyzeResult>
where
    N: ImageNormalizer,
    P: LandmarkProvider,
{
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut errors = 0usize;

    for (index, item) in source.images().enumerate() {
        let input = match item {
            Ok(input) => input,
            Err(rejected) => {
                warn!("Rejected {}: {}", rejected.path, rejected.reason);
                progress.on_event(ProgressEvent::Skipped {
                    path: rejected.path.clone(),
                    reason: rejected.reason.clone(),
                });
                output.write(&AnalysisRecord {
                    path: rejected.path,
                    timestamp: iso_timestamp(),
                    report: SymmetryReport::error(rejected.reason),
                })?;
                skipped += 1;
                errors += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: input.path.clone(),
            index,
            total,
        });

        let report = analyzer.analyze(&input).unwrap_or_else(|e| {
            warn!("Analysis failed for {}: {e}", input.path);
            SymmetryReport::error(format!("Error in analyzing image: {e}"))
        });

        let record = AnalysisRecord {
            path: input.path,
            timestamp: iso_timestamp(),
            report,
        };

        if record.is_error() {
            errors += 1;
        }

        output.write(&record)?;
        progress.on_event(ProgressEvent::Completed { record });
        processed += 1;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if errors > 0 {
        ExitCode::ErrorsReported
    } else {
        ExitCode::Success
    };

    Ok(AnalyzeResult {
        processed,
        skipped,
        errors,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use symmetry_core::{ImageInput, RejectedInput};
    use symmetry_test_support::{
        MockImageSource, MockLandmarkProvider, MockNormalizer, MockProgressSink, MockResultOutput,
        SyntheticLandmarks,
    };

    use super::*;

    fn analyzer(
        provider: MockLandmarkProvider,
    ) -> SymmetryAnalyzer<MockNormalizer, MockLandmarkProvider> {
        SymmetryAnalyzer::new(
            MockNormalizer::default(),
            provider,
            LandmarkTopology::default(),
        )
    }

    fn args(paths: &[&str]) -> AnalyzeArgs {
        AnalyzeArgs {
            paths: paths.iter().map(PathBuf::from).collect(),
            recursive: false,
            format: None,
            pretty: false,
            progress: false,
            quiet: true,
            frame_width: None,
            frame_height: None,
            landmarks_suffix: None,
            topology: None,
        }
    }

    #[test]
    fn test_all_scored_is_success() {
        let face = SyntheticLandmarks::uniform(100, 100).build();
        let source = MockImageSource::new(vec![
            ImageInput::new("a.jpg", vec![1]),
            ImageInput::new("b.jpg", vec![1]),
        ]);
        let output = MockResultOutput::new();
        let progress = MockProgressSink::new();

        let result = process_images(
            &source,
            &mut analyzer(MockLandmarkProvider::with_faces(vec![face])),
            &output,
            &progress,
        )
        .unwrap();

        assert_eq!(result.exit_code, ExitCode::Success);
        assert_eq!(result.processed, 2);
        let records = output.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].report.scores().unwrap().overall, 100.0);
        assert_eq!(output.flush_count(), 1);
        assert_eq!(progress.completed_count(), 2);
        assert_eq!(progress.finished_counts(), Some((2, 0)));
    }

    #[test]
    fn test_error_records_set_exit_code() {
        let source = MockImageSource::with_items(vec![
            Ok(ImageInput::new("noface.jpg", vec![1])),
            Ok(ImageInput::new("broken.jpg", vec![])),
            Err(RejectedInput::new("photo.png", "Invalid file type")),
        ]);
        let output = MockResultOutput::new();
        let progress = MockProgressSink::new();

        let result = process_images(
            &source,
            &mut analyzer(MockLandmarkProvider::no_faces()),
            &output,
            &progress,
        )
        .unwrap();

        assert_eq!(result.exit_code, ExitCode::ErrorsReported);
        assert_eq!(result.errors, 3);
        assert_eq!(result.skipped, 1);

        let messages: Vec<_> = output
            .records()
            .iter()
            .map(|r| r.report.error_message().unwrap().to_owned())
            .collect();
        assert_eq!(messages[0], "No face detected");
        assert!(messages[1].starts_with("Error in analyzing image: "));
        assert_eq!(messages[2], "Invalid file type");
        assert_eq!(progress.skipped_count(), 1);
        assert_eq!(progress.finished_counts(), Some((2, 1)));
    }

    #[test]
    fn test_provider_failure_is_error_record() {
        let source = MockImageSource::new(vec![ImageInput::new("a.jpg", vec![1])]);
        let output = MockResultOutput::new();
        let provider = MockLandmarkProvider::failing();
        let observer = provider.clone();

        let result = process_images(
            &source,
            &mut analyzer(provider),
            &output,
            &MockProgressSink::new(),
        )
        .unwrap();

        assert_eq!(result.exit_code, ExitCode::ErrorsReported);
        assert_eq!(observer.call_count(), 1);
        let message = output.records()[0].report.error_message().unwrap().to_owned();
        assert!(message.contains("no landmark data"));
    }

    #[test]
    fn test_with_config_respects_cli() {
        let config: AppConfig = toml::from_str(
            r"
[general]
recursive = true

[frame]
width = 200
height = 0

[landmarks]
sidecar_suffix = '.faces.json'
eyes = [1, 2]

[output]
format = 'json'
pretty = true
",
        )
        .unwrap();

        let mut cli = args(&["a.jpg"]);
        cli.format = Some(OutputFormat::Jsonl);
        cli.landmarks_suffix = Some(".cli.json".into());

        let merged = AnalyzeArgs::with_config(cli, &config);
        assert!(merged.recursive);
        assert!(merged.pretty);
        assert_eq!(merged.format(), OutputFormat::Jsonl);
        assert_eq!(merged.landmarks_suffix(), ".cli.json");
        assert_eq!(merged.frame_size(), FrameSize::new(200, 413));
        assert_eq!(merged.topology().eyes, symmetry_core::FeaturePair(1, 2));
    }

    #[test]
    fn test_defaults_without_config() {
        let merged = AnalyzeArgs::with_config(args(&["a.jpg"]), &AppConfig::default());
        assert_eq!(merged.format(), OutputFormat::Jsonl);
        assert_eq!(merged.frame_size(), FrameSize::new(310, 413));
        assert_eq!(merged.landmarks_suffix(), ".landmarks.json");
        assert_eq!(merged.topology(), LandmarkTopology::media_pipe());
    }

    #[test]
    fn test_empty_config_suffix_falls_back_to_default() {
        let config: AppConfig =
            toml::from_str("[landmarks]\nsidecar_suffix = ''").unwrap();

        let merged = AnalyzeArgs::with_config(args(&["a.jpg"]), &config);
        assert_eq!(merged.landmarks_suffix(), ".landmarks.json");
    }

    #[test]
    fn test_run_requires_paths() {
        let err = run(&args(&[])).unwrap_err();
        assert!(err.to_string().contains("No paths specified"));
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let ts = iso_timestamp();
        assert!(ts.contains('T'), "{ts}");
        assert!(ts.ends_with('Z'), "{ts}");
    }
}
