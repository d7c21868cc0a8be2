//! Test support utilities for face-symmetry.
//!
//! Provides mocks, synthetic landmark and image builders, and sidecar
//! helpers for testing the symmetry pipeline.
//!
//! # Example
//!
//! ```
//! use symmetry_test_support::{MockLandmarkProvider, SyntheticLandmarks};
//!
//! // A face whose left eye sits 10px left of the right eye
//! let face = SyntheticLandmarks::uniform(150, 200)
//!     .with_point(33, 140, 200)
//!     .build();
//!
//! let provider = MockLandmarkProvider::with_faces(vec![face]);
//! assert_eq!(provider.call_count(), 0);
//! ```

mod builders;
mod mocks;

pub use builders::{
    uniform_face, write_sidecar, NormalizedFace, SyntheticImageBuilder, SyntheticLandmarks,
};
pub use mocks::{
    MockImageSource, MockLandmarkProvider, MockNormalizer, MockProgressSink, MockResultOutput,
};
