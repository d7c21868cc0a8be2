//! Symmetry Core - Domain logic for facial symmetry scoring
//!
//! This crate contains the landmark and report types, the port traits that
//! connect the core to image decoding and landmark detection, and the pure
//! metric engine that turns a landmark set into symmetry scores.

pub mod analyzer;
pub mod domain;
pub mod engine;
pub mod error;
pub mod inference;
pub mod ports;

pub use analyzer::SymmetryAnalyzer;
pub use domain::{
    AnalysisRecord, FeaturePair, FrameSize, ImageFrame, ImageInput, LandmarkSet,
    LandmarkTopology, Point, SymmetryReport, SymmetryScores, DEFAULT_FRAME_HEIGHT,
    DEFAULT_FRAME_WIDTH, MEDIA_PIPE_POINT_COUNT, NO_FACE_MESSAGE,
};
pub use engine::{compute_symmetry, SymmetryEngine};
pub use error::{AnalysisError, ProviderError, RejectedInput, TopologyError};
pub use inference::{ProviderPool, SharedProvider};
pub use ports::{
    ImageNormalizer, ImageSource, LandmarkProvider, ProgressEvent, ProgressSink, ResultOutput,
};
