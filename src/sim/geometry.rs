//! Hexagon and segment geometry
//!
//! Pure functions: the container edges are regenerated from the current
//! rotation angle whenever they are needed, never cached.

use glam::DVec2;
use serde::Serialize;
use std::f64::consts::TAU;

use crate::polar_to_cartesian;

/// Number of sides of the container polygon
pub const HEXAGON_SIDES: usize = 6;

/// A straight wall segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    /// Closest point on this segment to `point`, and the distance to it
    #[inline]
    pub fn closest_point(&self, point: DVec2) -> (DVec2, f64) {
        closest_point_on_segment(point, self.start, self.end)
    }
}

/// Project `point` onto the segment, clamping to its endpoints
///
/// A zero-length segment returns `seg_start` and the distance to it.
pub fn closest_point_on_segment(point: DVec2, seg_start: DVec2, seg_end: DVec2) -> (DVec2, f64) {
    let line_vec = seg_end - seg_start;
    let point_vec = point - seg_start;
    let len_sq = line_vec.length_squared();

    if len_sq == 0.0 {
        return (seg_start, point_vec.length());
    }

    let t = (point_vec.dot(line_vec) / len_sq).clamp(0.0, 1.0);
    let closest = seg_start + line_vec * t;
    (closest, (point - closest).length())
}

/// Vertices of a regular hexagon, vertex k at `angle + k·2π/6`
pub fn hexagon_vertices(center: DVec2, circumradius: f64, angle: f64) -> [DVec2; HEXAGON_SIDES] {
    std::array::from_fn(|k| {
        center + polar_to_cartesian(circumradius, angle + k as f64 * TAU / HEXAGON_SIDES as f64)
    })
}

/// Edges joining consecutive vertices, wrapping the last back to the first
pub fn hexagon_edges(vertices: &[DVec2; HEXAGON_SIDES]) -> [Segment; HEXAGON_SIDES] {
    std::array::from_fn(|i| Segment::new(vertices[i], vertices[(i + 1) % HEXAGON_SIDES]))
}

/// Distance from the center of a regular polygon to the middle of an edge
#[inline]
pub fn apothem(circumradius: f64) -> f64 {
    circumradius * (std::f64::consts::PI / HEXAGON_SIDES as f64).cos()
}
