//! Simulation settings
//!
//! Physics constants, spin limits, container geometry and spawn policy.
//! Loaded from a JSON file by the headless host; every field has a default.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::geometry::apothem;

/// Named starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Gentle gravity, large balls, spin adjustable in both directions
    #[default]
    Classic,
    /// Heavier gravity, small balls, always spinning one way
    Spinner,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Spinner => "Spinner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "spinner" | "spin" => Some(Preset::Spinner),
            _ => None,
        }
    }
}

/// Per-tick force and loss coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Added to velocity.y every tick (+y points down the screen)
    pub gravity: f64,
    /// Componentwise velocity multiplier, in (0, 1]
    pub friction: f64,
    /// Velocity multiplier after a wall bounce, in [0, 1]
    pub bounce_damping: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            bounce_damping: BOUNCE_DAMPING,
        }
    }
}

impl PhysicsParams {
    /// No gravity, no friction, no wall loss
    pub fn frictionless() -> Self {
        Self {
            gravity: 0.0,
            friction: 1.0,
            bounce_damping: 1.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "gravity",
                value: self.gravity,
            });
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(SimError::InvalidParameter {
                name: "friction",
                value: self.friction,
            });
        }
        if !(0.0..=1.0).contains(&self.bounce_damping) {
            return Err(SimError::InvalidParameter {
                name: "bounce_damping",
                value: self.bounce_damping,
            });
        }
        Ok(())
    }
}

/// Closed interval the container's angular speed is clamped into (radians/tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinRange {
    pub min: f64,
    pub max: f64,
}

impl Default for SpinRange {
    fn default() -> Self {
        Self {
            min: -MAX_ANGULAR_SPEED,
            max: MAX_ANGULAR_SPEED,
        }
    }
}

impl SpinRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(SimError::InvalidSpinRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Fixed hexagon placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerParams {
    pub center: DVec2,
    pub circumradius: f64,
}

impl Default for ContainerParams {
    fn default() -> Self {
        Self {
            center: DVec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
            circumradius: HEXAGON_RADIUS,
        }
    }
}

/// How new bodies are placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    /// Bodies created with the state
    pub initial_count: u32,
    pub body_radius: f64,
    /// Initial bodies appear within ±spread of the center on each axis
    pub initial_spread: f64,
    /// Bodies added later appear within ±spread of the center on each axis
    pub add_spread: f64,
    /// Velocity components are drawn from [-max, max]
    pub max_initial_speed: f64,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            initial_count: INITIAL_BODIES,
            body_radius: BODY_RADIUS,
            initial_spread: INITIAL_SPREAD,
            add_spread: ADD_SPREAD,
            max_initial_speed: MAX_INITIAL_SPEED,
        }
    }
}

impl SpawnParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.body_radius.is_finite() && self.body_radius > 0.0) {
            return Err(SimError::InvalidRadius(self.body_radius));
        }
        for (name, value) in [
            ("initial_spread", self.initial_spread),
            ("add_spread", self.add_spread),
            ("max_initial_speed", self.max_initial_speed),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Validate, and check that a body spawned anywhere in either spawn
    /// square starts strictly inside a hexagon of the given circumradius
    pub fn validate_within(&self, circumradius: f64) -> Result<()> {
        self.validate()?;
        let limit = apothem(circumradius);
        for (name, value) in [("initial_spread", self.initial_spread), ("add_spread", self.add_spread)] {
            if value * std::f64::consts::SQRT_2 + self.body_radius >= limit {
                return Err(SimError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Headless runner knobs (ignored by the engine itself)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostParams {
    /// Ticks to run before printing the final snapshot
    pub ticks: u64,
    /// Log a summary every N ticks (0 = never)
    pub report_every: u64,
    /// Add one random body every N ticks (0 = never)
    pub add_every: u64,
}

impl Default for HostParams {
    fn default() -> Self {
        Self {
            ticks: 600,
            report_every: 60,
            add_every: 0,
        }
    }
}

/// Complete simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset these values were derived from
    pub preset: Preset,

    // === Physics ===
    pub physics: PhysicsParams,

    // === Container ===
    pub container: ContainerParams,
    pub spin: SpinRange,
    /// Angular speed at start (clamped into `spin`)
    pub initial_angular_speed: f64,
    /// Container rotation at start (radians)
    pub initial_angle: f64,

    // === Bodies ===
    pub spawn: SpawnParams,
    /// RNG seed (None = pick from the clock)
    pub seed: Option<u64>,

    // === Headless host ===
    pub host: HostParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: Preset::Classic,
            physics: PhysicsParams::default(),
            container: ContainerParams::default(),
            spin: SpinRange::default(),
            initial_angular_speed: 0.0,
            initial_angle: 0.0,
            spawn: SpawnParams::default(),
            seed: None,
            host: HostParams::default(),
        }
    }
}

impl Settings {
    /// Create settings from a preset
    pub fn from_preset(preset: Preset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Overwrite physics, spin and spawn values with the preset's
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;

        match preset {
            Preset::Classic => {
                self.physics = PhysicsParams::default();
                self.spin = SpinRange::default();
                self.initial_angular_speed = 0.0;
                self.initial_angle = 0.0;
                self.spawn = SpawnParams::default();
            }
            Preset::Spinner => {
                self.physics = PhysicsParams {
                    gravity: 0.5,
                    ..PhysicsParams::default()
                };
                self.spin = SpinRange {
                    min: 0.0,
                    max: MAX_ANGULAR_SPEED,
                };
                self.initial_angular_speed = 0.02;
                // Vertex at the top and bottom, flat left and right edges
                self.initial_angle = std::f64::consts::FRAC_PI_6;
                // Square corners must stay inside the inscribed circle
                let spread = self.container.circumradius * 0.5;
                self.spawn = SpawnParams {
                    initial_count: INITIAL_BODIES,
                    body_radius: 10.0,
                    initial_spread: spread,
                    add_spread: spread,
                    max_initial_speed: 2.0,
                };
            }
        }
    }

    /// Check every parameter against its domain
    pub fn validate(&self) -> Result<()> {
        self.physics.validate()?;
        self.spin.validate()?;
        let r = self.container.circumradius;
        if !(r.is_finite() && r > 0.0) {
            return Err(SimError::InvalidCircumradius(r));
        }
        self.spawn.validate_within(r)?;
        if !self.container.center.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "container.center",
                value: f64::NAN,
            });
        }
        for (name, value) in [
            ("initial_angular_speed", self.initial_angular_speed),
            ("initial_angle", self.initial_angle),
        ] {
            if !value.is_finite() {
                return Err(SimError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    ///
    /// Fields missing from the JSON take the values of the named `preset`
    /// (`Classic` when none is named). Fields present always win.
    pub fn from_json(json: &str) -> Result<Self> {
        let explicit: Value = serde_json::from_str(json)?;
        let preset = match explicit.get("preset") {
            Some(name) => Preset::deserialize(name)?,
            None => Preset::default(),
        };

        let mut merged = serde_json::to_value(Self::from_preset(preset))?;
        overlay(&mut merged, explicit);
        let settings: Settings = serde_json::from_value(merged)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from a file if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::load_from(path) {
                Ok(settings) => return settings,
                Err(e) => log::warn!("{e}; using default settings"),
            }
        } else {
            log::info!("Using default settings");
        }
        Self::default()
    }
}

/// Recursively replace values in `base` with those present in `patch`
fn overlay(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}
