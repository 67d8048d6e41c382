//! Collision detection and response
//!
//! The heart of the engine: resolving a falling racer against the course
//! edges and every live wall segment, with impulse/restitution bounces
//! and per-wall damage registration.

use glam::Vec2;

use super::events::{SimEvent, SurfaceKind};
use super::geometry::circle_overlaps_segment;
use super::wall::Wall;
use crate::consts::*;

/// Per-tick buffer of wall damage, keyed by wall index.
///
/// Each wall takes at most one hit per tick no matter how many racers
/// strike it; the first racer in lineup order claims the increment. The
/// buffer is merged into the walls only after every racer has resolved,
/// so no racer's collision pass observes mid-tick damage.
#[derive(Debug)]
pub struct HitLedger {
    hit: Vec<bool>,
}

impl HitLedger {
    pub fn new(wall_count: usize) -> Self {
        Self {
            hit: vec![false; wall_count],
        }
    }

    /// Register a hit; returns true if this is the first claim this tick
    pub fn claim(&mut self, index: usize) -> bool {
        let first = !self.hit[index];
        self.hit[index] = true;
        first
    }

    /// Indices of walls hit this tick
    pub fn hits(&self) -> impl Iterator<Item = usize> + '_ {
        self.hit
            .iter()
            .enumerate()
            .filter(|&(_, &h)| h)
            .map(|(i, _)| i)
    }
}

/// Reflect the left/right course boundaries.
///
/// Clamps the racer's circle back inside the course and flips the
/// horizontal velocity by -restitution when it was moving outward. Emits
/// a bounce event when the horizontal impact speed is worth hearing.
pub fn resolve_course_edges(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    course_width: f32,
    events: &mut Vec<SimEvent>,
) {
    if pos.x - radius < 0.0 {
        pos.x = radius;
        if vel.x < 0.0 {
            let impact = vel.x.abs();
            vel.x = -vel.x * RESTITUTION;
            if impact > BOUNCE_EVENT_MIN_SPEED {
                events.push(SimEvent::Bounce {
                    intensity: impact,
                    surface: SurfaceKind::CourseEdge,
                });
            }
        }
    } else if pos.x + radius > course_width {
        pos.x = course_width - radius;
        if vel.x > 0.0 {
            let impact = vel.x;
            vel.x = -vel.x * RESTITUTION;
            if impact > BOUNCE_EVENT_MIN_SPEED {
                events.push(SimEvent::Bounce {
                    intensity: impact,
                    surface: SurfaceKind::CourseEdge,
                });
            }
        }
    }
}

/// Resolve one racer against every live wall.
///
/// Walls carry the previous tick's hit counters; damage registered here
/// goes into the ledger and is merged afterward, so every racer this tick
/// sees the same wall state. Each overlap pushes the racer out along the
/// contact normal by the penetration depth plus a small epsilon and, when
/// the racer is moving into the wall, reflects the normal velocity
/// component by -restitution.
pub fn resolve_walls(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    walls: &[Wall],
    ledger: &mut HitLedger,
    events: &mut Vec<SimEvent>,
) {
    for (index, wall) in walls.iter().enumerate() {
        if wall.is_destroyed() || wall.is_degenerate() {
            continue;
        }
        let Some(contact) = circle_overlaps_segment(*pos, radius, wall.a, wall.b) else {
            continue;
        };

        ledger.claim(index);

        // Dead-center contact: the geometric normal is undefined, so fall
        // back to the segment's perpendicular, oriented against the
        // racer's motion.
        let normal = if contact.normal == Vec2::ZERO {
            fallback_normal(wall, *vel)
        } else {
            contact.normal
        };

        let penetration = radius - contact.distance;
        *pos += normal * (penetration + SEPARATION_EPSILON);

        let approach = vel.dot(normal);
        if approach < 0.0 {
            // Split into tangential and normal parts, reflect the normal
            // part with restitution, recombine.
            *vel -= (1.0 + RESTITUTION) * approach * normal;

            let intensity = -approach;
            let event = if wall.hits == 0 {
                SimEvent::Bounce {
                    intensity,
                    surface: SurfaceKind::Wall,
                }
            } else {
                SimEvent::Break {
                    intensity,
                    style: wall.style,
                }
            };
            events.push(event);
        }
        // approach >= 0: already separating, position fix only
    }
}

/// Deterministic normal for a racer centered exactly on a wall: the
/// segment's left-hand perpendicular, flipped to oppose the velocity.
fn fallback_normal(wall: &Wall, vel: Vec2) -> Vec2 {
    let d = wall.b - wall.a;
    let perp = Vec2::new(-d.y, d.x).normalize_or_zero();
    if vel.dot(perp) > 0.0 { -perp } else { perp }
}

/// Rescale velocity to the speed cap, preserving direction
pub fn cap_speed(vel: Vec2) -> Vec2 {
    let speed = vel.length();
    if speed > MAX_SPEED {
        vel * (MAX_SPEED / speed)
    } else {
        vel
    }
}
