//! Core domain types for symmetry analysis.

mod frame;
mod landmarks;
mod report;
mod result;
mod topology;

pub use frame::{FrameSize, ImageFrame, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};
pub use landmarks::{LandmarkSet, Point};
pub use report::{SymmetryReport, SymmetryScores, NO_FACE_MESSAGE};
pub use result::{AnalysisRecord, ImageInput};
pub use topology::{FeaturePair, LandmarkTopology, MEDIA_PIPE_POINT_COUNT};
