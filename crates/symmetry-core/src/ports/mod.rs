//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod image_source;
mod landmark_provider;
mod normalizer;
mod progress;
mod result_output;

pub use image_source::ImageSource;
pub use landmark_provider::LandmarkProvider;
pub use normalizer::ImageNormalizer;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
