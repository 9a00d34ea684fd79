//! Hexabounce - bouncing balls inside a rotating hexagon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, bodies, container, collisions, tick)
//! - `settings`: Data-driven physics and spawn configuration
//! - `error`: Construction and configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::{Preset, Settings};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Downward acceleration added to velocity.y every tick
    pub const GRAVITY: f64 = 0.3;
    /// Componentwise velocity multiplier applied every tick
    pub const FRICTION: f64 = 0.98;
    /// Fraction of velocity kept after a wall bounce
    pub const BOUNCE_DAMPING: f64 = 0.8;

    /// Container defaults (800x600 world, hexagon in the middle)
    pub const WORLD_WIDTH: f64 = 800.0;
    pub const WORLD_HEIGHT: f64 = 600.0;
    pub const HEXAGON_RADIUS: f64 = 200.0;

    /// Angular speed bounds (radians per tick)
    pub const MAX_ANGULAR_SPEED: f64 = 0.05;

    /// Body defaults
    pub const BODY_RADIUS: f64 = 15.0;
    /// mass = radius / RADIUS_PER_MASS
    pub const RADIUS_PER_MASS: f64 = 10.0;
    pub const INITIAL_BODIES: u32 = 5;
    /// Half-width of the square around the center where initial bodies appear
    pub const INITIAL_SPREAD: f64 = 50.0;
    /// Half-width of the square around the center where added bodies appear
    pub const ADD_SPREAD: f64 = 100.0;
    /// Initial velocity components are drawn from [-MAX, MAX]
    pub const MAX_INITIAL_SPEED: f64 = 3.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    if !angle.is_finite() {
        return angle;
    }
    angle = angle.rem_euclid(2.0 * PI);
    if angle >= PI {
        angle -= 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_angle() {
        // 3π sits on the wrap boundary; either end is acceptable up to rounding
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-9);
        assert!((normalize_angle(-PI / 2.0) - -PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-12);
        let wrapped = normalize_angle(1000.0);
        assert!((-PI..PI).contains(&wrapped));
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, PI / 2.0);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }
}
