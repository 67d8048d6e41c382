//! Fixed timestep frame step
//!
//! Advances the whole world by one tick. The step is a pure function from
//! the previous snapshot to the next one plus the tick's collision
//! events; the controller publishes the result, so every read during a
//! tick sees one consistent prior snapshot.

use super::collision::{HitLedger, cap_speed, resolve_course_edges, resolve_walls};
use super::events::SimEvent;
use super::particles;
use super::state::SimState;
use crate::consts::{GRAVITY, WALL_DESTROY_HITS};

/// Advance the race by one tick.
///
/// Order within the tick: particle integration, per-racer gravity /
/// position integration / collision resolution (wall damage buffered in
/// the ledger), damage merge with edge-triggered debris bursts, win
/// check, camera update.
pub fn step(prev: &SimState) -> (SimState, Vec<SimEvent>) {
    let mut next = prev.clone();
    let mut events = Vec::new();
    next.time_ticks += 1;

    particles::integrate(&mut next.particles);

    // Every racer resolves against the previous tick's wall state; damage
    // lands in the ledger so a wall broken by the first racer still
    // reflects the rest this tick.
    let walls = &prev.course.walls;
    let mut ledger = HitLedger::new(walls.len());
    for racer in &mut next.racers {
        racer.vel.y += GRAVITY;
        racer.pos += racer.vel;
        resolve_course_edges(
            &mut racer.pos,
            &mut racer.vel,
            racer.radius,
            next.course.width,
            &mut events,
        );
        resolve_walls(
            &mut racer.pos,
            &mut racer.vel,
            racer.radius,
            walls,
            &mut ledger,
            &mut events,
        );
        racer.vel = cap_speed(racer.vel);
    }

    // Merge buffered damage: one increment per wall per tick. Crossing
    // the destroyed threshold is the sole debris trigger and fires only
    // on that edge.
    for index in ledger.hits() {
        let wall = &mut next.course.walls[index];
        let was_live = wall.hits < WALL_DESTROY_HITS;
        wall.hits += 1;
        if was_live && wall.hits >= WALL_DESTROY_HITS {
            log::debug!("wall {index} destroyed at tick {}", next.time_ticks);
            let burst = particles::spawn_burst(
                next.seed,
                next.time_ticks,
                index,
                wall.midpoint(),
                &mut next.next_particle_id,
            );
            next.particles.extend(burst);
        }
    }

    // First racer in lineup order past the finish line wins; once set the
    // winner never changes.
    if next.winner.is_none() {
        next.winner = next
            .racers
            .iter()
            .find(|r| r.pos.y > next.course.height)
            .map(|r| r.kind);
    }

    let lead_y = next
        .racers
        .iter()
        .map(|r| r.pos.y)
        .fold(f32::NEG_INFINITY, f32::max);
    next.camera.advance(lead_y);

    (next, events)
}
