//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call = one tick)
//! - Seeded RNG only
//! - Stable iteration order (by body index)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod container;
pub mod geometry;
pub mod state;
pub mod tick;

pub use body::{Body, BodyHandle, add_body};
pub use collision::{CollisionResult, PairOutcome, TickReport, WallCheck, reflect_velocity};
pub use container::Container;
pub use geometry::{HEXAGON_SIDES, Segment, closest_point_on_segment, hexagon_edges, hexagon_vertices};
pub use state::SimState;
pub use tick::{TickInput, advance_tick, tick};
