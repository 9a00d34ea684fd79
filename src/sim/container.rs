//! The rotating hexagonal container

use glam::DVec2;
use serde::Serialize;

use super::geometry::{HEXAGON_SIDES, Segment, hexagon_edges, hexagon_vertices};
use crate::error::{Result, SimError};
use crate::normalize_angle;
use crate::settings::{ContainerParams, SpinRange};

/// A regular hexagon spinning about its center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    center: DVec2,
    circumradius: f64,
    /// Accumulated rotation (radians, never wrapped)
    pub angle: f64,
    /// Radians per tick, always inside `spin_range`
    angular_speed: f64,
    spin_range: SpinRange,
}

impl Container {
    pub fn new(center: DVec2, circumradius: f64, spin_range: SpinRange) -> Result<Self> {
        if !(circumradius.is_finite() && circumradius > 0.0) {
            return Err(SimError::InvalidCircumradius(circumradius));
        }
        spin_range.validate()?;
        Ok(Self {
            center,
            circumradius,
            angle: 0.0,
            angular_speed: spin_range.clamp(0.0),
            spin_range,
        })
    }

    pub fn from_params(params: &ContainerParams, spin_range: SpinRange) -> Result<Self> {
        Self::new(params.center, params.circumradius, spin_range)
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.center
    }

    #[inline]
    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    #[inline]
    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    #[inline]
    pub fn spin_range(&self) -> SpinRange {
        self.spin_range
    }

    /// Set the spin, clamped into the configured range. Returns the applied value.
    ///
    /// Non-finite input leaves the current speed untouched.
    pub fn set_angular_speed(&mut self, value: f64) -> f64 {
        if !value.is_finite() {
            log::warn!("Ignoring non-finite angular speed {value}");
            return self.angular_speed;
        }
        let clamped = self.spin_range.clamp(value);
        if clamped != value {
            log::debug!("Angular speed {value} clamped to {clamped}");
        }
        self.angular_speed = clamped;
        clamped
    }

    /// Advance the rotation by one tick
    #[inline]
    pub fn rotate(&mut self) {
        self.angle += self.angular_speed;
    }

    /// Current rotation wrapped to [-π, π), for display
    pub fn heading(&self) -> f64 {
        normalize_angle(self.angle)
    }

    pub fn vertices(&self) -> [DVec2; HEXAGON_SIDES] {
        hexagon_vertices(self.center, self.circumradius, self.angle)
    }

    pub fn edges(&self) -> [Segment; HEXAGON_SIDES] {
        hexagon_edges(&self.vertices())
    }

    /// Signed distance from `point` to the nearest wall (positive inside)
    pub fn clearance(&self, point: DVec2) -> f64 {
        let inside = self.contains(point);
        let nearest = self
            .edges()
            .iter()
            .map(|edge| edge.closest_point(point).1)
            .fold(f64::INFINITY, f64::min);
        if inside { nearest } else { -nearest }
    }

    /// Whether `point` lies inside (or on) the hexagon
    pub fn contains(&self, point: DVec2) -> bool {
        // Convex polygon with consistent winding: same side of every edge
        let mut sign = 0.0;
        for edge in self.edges() {
            let cross = (edge.end - edge.start).perp_dot(point - edge.start);
            if cross == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }
}
