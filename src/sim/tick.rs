//! Fixed timestep simulation tick
//!
//! Advances the container and bodies by one step. The step order is fixed:
//! rotate, integrate, walls, pairs.

use super::body::Body;
use super::collision::{TickReport, resolve_all_pairs, resolve_wall_collisions};
use super::container::Container;
use super::state::SimState;
use crate::error::Result;
use crate::settings::PhysicsParams;

/// Host requests applied before a tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New container spin (clamped into the configured range)
    pub angular_speed: Option<f64>,
    /// Random bodies to add ("Add Ball" presses)
    pub add_bodies: u32,
}

/// Advance one tick in place
pub fn advance_tick(container: &mut Container, bodies: &mut [Body], physics: &PhysicsParams) -> TickReport {
    container.rotate();

    for body in bodies.iter_mut() {
        body.integrate(physics.gravity, physics.friction);
    }

    // Walls use the post-rotation edges
    let walls = container.edges();
    let mut report = TickReport::default();
    for body in bodies.iter_mut() {
        report.merge(&resolve_wall_collisions(body, &walls, physics.bounce_damping));
    }

    report.merge(&resolve_all_pairs(bodies));
    report
}

/// Apply host input, then advance the state by one tick
///
/// Input is applied all-or-nothing: if the spawn policy is invalid the state
/// is left untouched.
pub fn tick(state: &mut SimState, input: &TickInput) -> Result<TickReport> {
    if input.add_bodies > 0 {
        state.check_spawn()?;
    }
    if let Some(speed) = input.angular_speed {
        state.set_angular_speed(speed);
    }
    for _ in 0..input.add_bodies {
        state.spawn_random_body()?;
    }

    state.time_ticks += 1;
    let physics = state.physics;
    let report = advance_tick(&mut state.container, &mut state.bodies, &physics);

    if report.degenerate_skips > 0 {
        log::trace!(
            "Tick {}: skipped {} degenerate contacts",
            state.time_ticks,
            report.degenerate_skips
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SpinRange, Settings};
    use crate::sim::geometry::apothem;
    use glam::DVec2;

    fn hexagon() -> Container {
        Container::new(DVec2::new(400.0, 300.0), 200.0, SpinRange::default()).unwrap()
    }

    fn empty_state(seed: u64) -> SimState {
        let mut settings = Settings::default();
        settings.spawn.initial_count = 0;
        SimState::new(&settings, seed).unwrap()
    }

    #[test]
    fn test_rotation_determinism() {
        let mut container = hexagon();
        container.angle = 0.25;
        container.set_angular_speed(0.013);
        let mut bodies: Vec<Body> = Vec::new();

        let mut expected = 0.25;
        for _ in 0..1000 {
            advance_tick(&mut container, &mut bodies, &PhysicsParams::default());
            expected += 0.013;
        }
        assert_eq!(container.angle, expected);
        assert!((container.angle - (0.25 + 1000.0 * 0.013)).abs() < 1e-9);
    }

    #[test]
    fn test_integration_before_collision() {
        let mut container = hexagon();
        let mut bodies = vec![Body::new(DVec2::new(400.0, 300.0), DVec2::new(1.0, 0.0), 10.0).unwrap()];
        let physics = PhysicsParams::default();
        let report = advance_tick(&mut container, &mut bodies, &physics);

        assert_eq!(report, TickReport::default());
        let vel = DVec2::new(1.0 * physics.friction, physics.gravity * physics.friction);
        assert_eq!(bodies[0].vel, vel);
        assert_eq!(bodies[0].pos, DVec2::new(400.0, 300.0) + vel);
    }

    #[test]
    fn test_body_settles_on_bottom_edge() {
        // Angle 0 gives a flat bottom edge at center.y + apothem (+y is down)
        let mut container = hexagon();
        let mut bodies = vec![Body::new(container.center(), DVec2::ZERO, 15.0).unwrap()];
        let physics = PhysicsParams::default();
        let rest_y = container.center().y + apothem(200.0) - 15.0;

        let mut post_impact_speeds = Vec::new();
        for _ in 0..3000 {
            let report = advance_tick(&mut container, &mut bodies, &physics);
            if report.wall_hits > 0 {
                post_impact_speeds.push(bodies[0].speed());
            }
        }

        let body = &bodies[0];
        assert!((body.pos.x - 400.0).abs() < 1e-9);
        assert!((body.pos.y - rest_y).abs() < 1e-6);
        assert!(body.speed() < 0.5);

        // Rebounds lose speed until the ball is resting on the floor
        let bounces: Vec<f64> = post_impact_speeds.into_iter().take_while(|&s| s > 0.3).collect();
        assert!(bounces.len() >= 5);
        for pair in bounces.windows(2) {
            assert!(pair[1] <= pair[0], "rebound sped up: {pair:?}");
        }
    }

    #[test]
    fn test_isolated_wall_impact_loses_energy() {
        let mut container = hexagon();
        let floor_y = container.center().y + apothem(200.0);
        let mut bodies = vec![Body::new(DVec2::new(400.0, floor_y - 12.0), DVec2::new(1.0, 5.0), 10.0).unwrap()];
        let before = bodies[0].speed();

        let report = advance_tick(&mut container, &mut bodies, &PhysicsParams {
            bounce_damping: 0.8,
            ..PhysicsParams::frictionless()
        });
        assert_eq!(report.wall_hits, 1);
        assert!(bodies[0].speed() < before);
        assert!(bodies[0].vel.y < 0.0);
        // Pushed back out to exactly touching
        assert!(container.clearance(bodies[0].pos) >= 10.0 - 1e-6);
    }

    #[test]
    fn test_head_on_equal_mass_swap() {
        let mut container = hexagon();
        let c = container.center();
        let mut bodies = vec![
            Body::new(c - DVec2::new(12.0, 0.0), DVec2::new(3.0, 0.0), 10.0).unwrap(),
            Body::new(c + DVec2::new(12.0, 0.0), DVec2::new(-3.0, 0.0), 10.0).unwrap(),
        ];
        let report = advance_tick(&mut container, &mut bodies, &PhysicsParams::frictionless());

        assert_eq!(report.pair_impulses, 1);
        assert!((bodies[0].vel - DVec2::new(-3.0, 0.0)).length() < 1e-12);
        assert!((bodies[1].vel - DVec2::new(3.0, 0.0)).length() < 1e-12);
        assert!(((bodies[1].pos - bodies[0].pos).length() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_pair_overlap_after_tick() {
        let mut container = hexagon();
        let c = container.center();
        let mut bodies = vec![
            Body::new(c, DVec2::new(2.0, 1.0), 15.0).unwrap(),
            Body::new(c + DVec2::new(10.0, 5.0), DVec2::new(-1.0, 0.0), 12.0).unwrap(),
        ];
        advance_tick(&mut container, &mut bodies, &PhysicsParams::default());
        let gap = (bodies[1].pos - bodies[0].pos).length();
        assert!(gap >= 27.0 - 1e-6);
    }

    #[test]
    fn test_tick_applies_input() {
        let mut state = empty_state(11);
        let input = TickInput {
            angular_speed: Some(1.0),
            add_bodies: 3,
        };
        tick(&mut state, &input).unwrap();
        assert_eq!(state.bodies.len(), 3);
        assert_eq!(state.container.angular_speed(), 0.05);
        assert_eq!(state.container.angle, 0.05);
        assert_eq!(state.time_ticks, 1);

        // No input keeps the spin
        tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(state.container.angular_speed(), 0.05);
        assert_eq!(state.bodies.len(), 3);
    }

    #[test]
    fn test_rejected_input_leaves_state_untouched() {
        let mut state = empty_state(12);
        state.spawn.max_initial_speed = -1.0;
        let input = TickInput {
            angular_speed: Some(0.04),
            add_bodies: 2,
        };
        assert!(tick(&mut state, &input).is_err());
        assert!(state.bodies.is_empty());
        assert_eq!(state.container.angular_speed(), 0.0);
        assert_eq!(state.time_ticks, 0);

        // Spin-only input does not depend on the spawn policy
        tick(&mut state, &TickInput {
            angular_speed: Some(0.04),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(state.container.angular_speed(), 0.04);
    }

    #[test]
    fn test_bodies_stay_inside_spinning_hexagon() {
        let mut state = SimState::new(&Settings::default(), 2024).unwrap();
        let input = TickInput {
            angular_speed: Some(0.03),
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut state, &input).unwrap();
        }
        for body in &state.bodies {
            assert!(state.container.contains(body.pos), "body escaped: {:?}", body.pos);
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = SimState::new(&Settings::default(), 99999).unwrap();
        let mut state2 = SimState::new(&Settings::default(), 99999).unwrap();

        let inputs = [
            TickInput {
                angular_speed: Some(0.02),
                ..Default::default()
            },
            TickInput {
                add_bodies: 1,
                ..Default::default()
            },
            TickInput {
                angular_speed: Some(-0.04),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input).unwrap();
                tick(&mut state2, input).unwrap();
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.bodies, state2.bodies);
        assert_eq!(state1.container, state2.container);
    }
}
