//! Collision detection and response
//!
//! Two contact kinds: a ball against a container wall segment, and a ball
//! against another ball. Contacts whose normal cannot be determined (coincident
//! points) are skipped for the tick instead of guessing a direction.

use glam::DVec2;
use serde::Serialize;

use super::body::Body;
use super::geometry::Segment;

/// Contact between a ball and a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Closest point on the wall
    pub point: DVec2,
    /// Unit normal pointing from the wall toward the ball center
    pub normal: DVec2,
    /// Overlap depth (radius - distance)
    pub penetration: f64,
}

/// Outcome of checking one ball against one wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallCheck {
    Clear,
    Contact(CollisionResult),
    /// Overlapping, but no usable normal exists
    Degenerate,
}

/// Outcome of resolving one pair of balls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    Clear,
    /// Overlap corrected; already moving apart so velocities were kept
    Separating,
    /// Overlap corrected and impulse applied
    Resolved,
    /// Centers coincide, nothing done
    Degenerate,
}

/// Collision counters for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Ball-wall contacts resolved
    pub wall_hits: u32,
    /// Overlapping pairs separated
    pub pair_contacts: u32,
    /// Pairs that also exchanged an impulse
    pub pair_impulses: u32,
    /// Contacts skipped for lack of a normal
    pub degenerate_skips: u32,
}

impl TickReport {
    pub fn merge(&mut self, other: &TickReport) {
        self.wall_hits += other.wall_hits;
        self.pair_contacts += other.pair_contacts;
        self.pair_impulses += other.pair_impulses;
        self.degenerate_skips += other.degenerate_skips;
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check a ball against one wall segment
pub fn ball_wall_collision(ball_pos: DVec2, ball_radius: f64, wall: &Segment) -> WallCheck {
    let (closest, dist) = wall.closest_point(ball_pos);

    if dist >= ball_radius {
        return WallCheck::Clear;
    }

    let normal = if dist > 0.0 {
        (ball_pos - closest) / dist
    } else {
        // Center sits on the wall: fall back to the wall's first vertex
        let fallback = ball_pos - wall.start;
        let len = fallback.length();
        if len == 0.0 {
            return WallCheck::Degenerate;
        }
        fallback / len
    };

    WallCheck::Contact(CollisionResult {
        point: closest,
        normal,
        penetration: ball_radius - dist,
    })
}

/// Resolve a ball against every wall, in winding order
///
/// Each wall is handled once; a later push-out is not re-checked against
/// earlier walls.
pub fn resolve_wall_collisions(body: &mut Body, walls: &[Segment], bounce_damping: f64) -> TickReport {
    let mut report = TickReport::default();

    for wall in walls {
        match ball_wall_collision(body.pos, body.radius(), wall) {
            WallCheck::Clear => {}
            WallCheck::Contact(hit) => {
                body.pos += hit.normal * hit.penetration;
                body.vel = reflect_velocity(body.vel, hit.normal) * bounce_damping;
                report.wall_hits += 1;
            }
            WallCheck::Degenerate => {
                log::trace!("Skipping degenerate wall contact at {:?}", body.pos);
                report.degenerate_skips += 1;
            }
        }
    }

    report
}

/// Separate two overlapping balls and exchange momentum along their normal
pub fn resolve_ball_pair(a: &mut Body, b: &mut Body) -> PairOutcome {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius() + b.radius();

    if dist >= min_dist {
        return PairOutcome::Clear;
    }
    if dist == 0.0 {
        log::trace!("Skipping coincident balls at {:?}", a.pos);
        return PairOutcome::Degenerate;
    }

    let normal = delta / dist;

    // Split the overlap evenly
    let correction = normal * ((min_dist - dist) * 0.5);
    a.pos -= correction;
    b.pos += correction;

    let dvn = (b.vel - a.vel).dot(normal);
    if dvn > 0.0 {
        return PairOutcome::Separating;
    }

    let impulse = 2.0 * dvn / (a.mass() + b.mass());
    a.vel += normal * (impulse * b.mass());
    b.vel -= normal * (impulse * a.mass());

    PairOutcome::Resolved
}

/// Resolve every unordered pair (i < j) once, in index order
pub fn resolve_all_pairs(bodies: &mut [Body]) -> TickReport {
    let mut report = TickReport::default();

    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            match resolve_ball_pair(a, b) {
                PairOutcome::Clear => {}
                PairOutcome::Separating => report.pair_contacts += 1,
                PairOutcome::Resolved => {
                    report.pair_contacts += 1;
                    report.pair_impulses += 1;
                }
                PairOutcome::Degenerate => report.degenerate_skips += 1,
            }
        }
    }

    report
}
