//! Landmark points and ordered landmark sets.

use serde::{Deserialize, Serialize};

/// A landmark position in pixel space of the canonical frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column, in pixels from the left edge.
    pub x: i32,
    /// Row, in pixels from the top edge.
    pub y: i32,
}

impl Point {
    /// Creates a point from pixel coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Ordered landmarks for a single face.
///
/// Index position carries meaning: the same index always names the same
/// anatomical feature for a given detection topology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    /// Wraps pixel-space points in topology order.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Converts normalized `[0,1]` coordinates to pixel space.
    ///
    /// Each coordinate is scaled by the frame dimension and truncated toward
    /// zero, which is how landmark models report positions on the frame.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_normalized(coords: &[[f64; 2]], width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let points = coords
            .iter()
            .map(|[x, y]| Point::new((x * w) as i32, (y * h) as i32))
            .collect();
        Self { points }
    }

    /// Number of landmarks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the set holds no landmarks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All landmarks in topology order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Landmark at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }
}

impl From<Vec<Point>> for LandmarkSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}
