//! The symmetry metric engine.
//!
//! Pure arithmetic over a landmark set: no I/O, no shared state. Safe to call
//! from any number of threads at once.

mod symmetry;

pub use symmetry::{compute_symmetry, SymmetryEngine};
