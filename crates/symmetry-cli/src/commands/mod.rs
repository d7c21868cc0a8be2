//! CLI command definitions and handlers.

pub mod analyze;
pub mod topology;

use clap::{Parser, Subcommand};

/// face-symmetry - Facial symmetry scoring from detected landmarks
#[derive(Parser)]
#[command(name = "face-symmetry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared analyze arguments (paths, frame size, output flags).
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Score facial symmetry for images
    Analyze(analyze::AnalyzeArgs),
    /// Print the effective landmark topology
    Topology(topology::TopologyArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every analyzed image produced scores.
    Success = 0,
    /// At least one image produced an error record.
    ErrorsReported = 1,
    /// Fatal error before or during the run.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
