//! Symmetry metric computation.
//!
//! Every score has the form `max(0, 100 - distance)` where `distance` is a
//! non-negative pixel distance, so scores always fall in `[0, 100]`:
//! - eyes, mouth, nose: x-distance between the two landmarks of a pair
//! - eyebrows, jawline: y-distance between the two landmarks of a pair
//! - vertical symmetry: mean contour deviation from the nose-bridge midline
//! - horizontal symmetry: distance between mean upper and lower eyelid rows

// Landmark coordinates are bounded pixel positions
#![allow(clippy::cast_precision_loss)]

use tracing::trace;

use crate::domain::{
    FeaturePair, LandmarkSet, LandmarkTopology, Point, SymmetryReport, SymmetryScores,
};

/// Message for frames with a zero dimension.
const ZERO_FRAME_MESSAGE: &str = "Frame dimensions must be non-zero";

/// Scores landmark sets against a fixed topology.
#[derive(Debug, Clone, Default)]
pub struct SymmetryEngine {
    topology: LandmarkTopology,
}

impl SymmetryEngine {
    /// Creates an engine for the given topology.
    #[must_use]
    pub const fn new(topology: LandmarkTopology) -> Self {
        Self { topology }
    }

    /// The topology this engine reads landmarks with.
    #[must_use]
    pub const fn topology(&self) -> &LandmarkTopology {
        &self.topology
    }

    /// Scores one face. See [`compute_symmetry`].
    #[must_use]
    pub fn compute(&self, landmarks: &LandmarkSet, width: u32, height: u32) -> SymmetryReport {
        compute_symmetry(landmarks, width, height, &self.topology)
    }
}

/// Computes the symmetry report for one face.
///
/// `width` and `height` are the dimensions of the frame the landmarks were
/// measured on. All distances are in pixels of that frame.
///
/// Never panics: a zero-sized frame, an invalid topology, or a landmark set
/// too short for the topology produce an error report.
#[must_use]
pub fn compute_symmetry(
    landmarks: &LandmarkSet,
    width: u32,
    height: u32,
    topology: &LandmarkTopology,
) -> SymmetryReport {
    if width == 0 || height == 0 {
        return SymmetryReport::error(ZERO_FRAME_MESSAGE);
    }
    if let Err(e) = topology.validate() {
        return SymmetryReport::error(e.to_string());
    }
    let required = topology.required_points();
    if landmarks.len() < required {
        return SymmetryReport::error(format!(
            "Landmark set has {} points, topology requires at least {required}",
            landmarks.len()
        ));
    }

    let points = landmarks.points();

    let eyes = pair_score(points, topology.eyes, |p| p.x);
    let mouth = pair_score(points, topology.mouth, |p| p.x);
    let nose = pair_score(points, topology.nose, |p| p.x);
    let eyebrows = pair_score(points, topology.eyebrows, |p| p.y);
    let jawline = pair_score(points, topology.jawline, |p| p.y);

    let midline = midline_x(points, topology.nose_bridge);
    let vertical_symmetry = floored(contour_deviation(points, &topology.contour, midline));

    let eye_top = mean_y(points, &topology.eye_top);
    let eye_bottom = mean_y(points, &topology.eye_bottom);
    let horizontal_symmetry = floored((eye_bottom - eye_top).abs());

    let metrics = [
        eyes,
        mouth,
        nose,
        eyebrows,
        jawline,
        vertical_symmetry,
        horizontal_symmetry,
    ];
    let overall = metrics.iter().sum::<f64>() / metrics.len() as f64;

    trace!(midline, eye_top, eye_bottom, overall, "computed symmetry");

    SymmetryReport::Scores(SymmetryScores {
        eyes,
        mouth,
        nose,
        eyebrows,
        jawline,
        vertical_symmetry,
        horizontal_symmetry,
        overall,
    })
}

/// `max(0, 100 - distance)`.
fn floored(distance: f64) -> f64 {
    (100.0 - distance).max(0.0)
}

/// Score for the distance between a pair of landmarks along one axis.
fn pair_score(points: &[Point], pair: FeaturePair, axis: impl Fn(Point) -> i32) -> f64 {
    let a = i64::from(axis(points[pair.first()]));
    let b = i64::from(axis(points[pair.second()]));
    floored((a - b).abs() as f64)
}

/// Midline column: floored mean x of the nose-bridge pair.
fn midline_x(points: &[Point], bridge: FeaturePair) -> i64 {
    let sum = i64::from(points[bridge.first()].x) + i64::from(points[bridge.second()].x);
    sum.div_euclid(2)
}

/// Mean deviation of mirrored contour pairs from the midline.
///
/// For a pair reflected exactly about the midline, `x_left + x_right` equals
/// `2 * midline`, so the deviation is zero.
fn contour_deviation(points: &[Point], contour: &[usize], midline: i64) -> f64 {
    let total: i64 = contour
        .iter()
        .zip(contour.iter().rev())
        .map(|(&left, &right)| {
            let pair_sum = i64::from(points[left].x) + i64::from(points[right].x);
            (2 * midline - pair_sum).abs()
        })
        .sum();
    total as f64 / contour.len() as f64
}

/// Mean y of the given landmarks.
fn mean_y(points: &[Point], indices: &[usize]) -> f64 {
    let total: i64 = indices.iter().map(|&i| i64::from(points[i].y)).sum();
    total as f64 / indices.len() as f64
}
