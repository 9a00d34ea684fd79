//! Simulation state
//!
//! Everything a host needs to keep between ticks lives here: the container,
//! the ordered body list and the seeded RNG used for spawning.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::body::{self, Body, BodyHandle};
use super::container::Container;
use crate::error::Result;
use crate::settings::{PhysicsParams, Settings, SpawnParams};

/// Complete simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub container: Container,
    /// Bodies in creation order; the index is the body's identity
    pub bodies: Vec<Body>,
    pub physics: PhysicsParams,
    pub spawn: SpawnParams,
    #[serde(skip)]
    rng: Pcg32,
}

impl SimState {
    /// Build a state from settings, spawning the initial bodies
    pub fn new(settings: &Settings, seed: u64) -> Result<Self> {
        settings.validate()?;

        let mut container = Container::from_params(&settings.container, settings.spin)?;
        container.angle = settings.initial_angle;
        container.set_angular_speed(settings.initial_angular_speed);

        let mut state = Self {
            seed,
            time_ticks: 0,
            container,
            bodies: Vec::with_capacity(settings.spawn.initial_count as usize),
            physics: settings.physics,
            spawn: settings.spawn,
            rng: Pcg32::seed_from_u64(seed),
        };

        for _ in 0..settings.spawn.initial_count {
            state.spawn_body_within(settings.spawn.initial_spread)?;
        }
        log::debug!(
            "Created state with {} bodies (seed {seed})",
            state.bodies.len()
        );

        Ok(state)
    }

    /// Append a body with caller-chosen position, velocity and radius
    pub fn add_body(&mut self, pos: DVec2, vel: DVec2, radius: f64) -> Result<BodyHandle> {
        body::add_body(&mut self.bodies, pos, vel, radius)
    }

    /// Append a body near the center with a random velocity ("Add Ball")
    pub fn spawn_random_body(&mut self) -> Result<BodyHandle> {
        self.check_spawn()?;
        self.spawn_body_within(self.spawn.add_spread)
    }

    /// Check the current spawn policy against the container
    ///
    /// `spawn` is public and may have been edited since the state was built.
    pub fn check_spawn(&self) -> Result<()> {
        self.spawn.validate_within(self.container.circumradius())
    }

    fn spawn_body_within(&mut self, spread: f64) -> Result<BodyHandle> {
        let center = self.container.center();
        let max_speed = self.spawn.max_initial_speed;
        let pos = center
            + DVec2::new(
                self.rng.random_range(-spread..=spread),
                self.rng.random_range(-spread..=spread),
            );
        let vel = DVec2::new(
            self.rng.random_range(-max_speed..=max_speed),
            self.rng.random_range(-max_speed..=max_speed),
        );
        let handle = self.add_body(pos, vel, self.spawn.body_radius)?;
        log::debug!("Spawned body {} at ({:.1}, {:.1})", handle.index(), pos.x, pos.y);
        Ok(handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.index())
    }

    /// Set the container spin (clamped), returning the applied value
    pub fn set_angular_speed(&mut self, value: f64) -> f64 {
        self.container.set_angular_speed(value)
    }

    pub fn kinetic_energy(&self) -> f64 {
        body::total_kinetic_energy(&self.bodies)
    }

    pub fn momentum(&self) -> DVec2 {
        body::total_momentum(&self.bodies)
    }
}
