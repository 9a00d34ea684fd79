//! Circular rigid bodies

use glam::DVec2;
use serde::Serialize;

use crate::consts::RADIUS_PER_MASS;
use crate::error::{Result, SimError};

/// Index of a body in the simulation's ordered body list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A ball. Radius and mass are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub pos: DVec2,
    /// Units per tick
    pub vel: DVec2,
    radius: f64,
    mass: f64,
}

impl Body {
    /// Create a body; mass is derived from the radius
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        Ok(Self {
            pos,
            vel,
            radius,
            mass: radius / RADIUS_PER_MASS,
        })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.vel * self.mass
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Apply gravity and friction, then move by the new velocity
    pub fn integrate(&mut self, gravity: f64, friction: f64) {
        self.vel.y += gravity;
        self.vel *= friction;
        self.pos += self.vel;
    }
}

/// Append a new body and return its handle
pub fn add_body(bodies: &mut Vec<Body>, pos: DVec2, vel: DVec2, radius: f64) -> Result<BodyHandle> {
    let body = Body::new(pos, vel, radius)?;
    bodies.push(body);
    Ok(BodyHandle(bodies.len() - 1))
}

/// Sum of m·v over all bodies
pub fn total_momentum(bodies: &[Body]) -> DVec2 {
    bodies.iter().map(Body::momentum).sum()
}

/// Sum of ½·m·|v|² over all bodies
pub fn total_kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}
