//! Race controller state machine
//!
//! Owns the current snapshot and governs Building / Idle / Racing /
//! Finished. The host drives it from a frame-timing source: capture a
//! [`TickToken`] when scheduling, hand it back to [`RaceController::step`]
//! on fire. Every reset bumps the epoch, so a tick scheduled against a
//! stale world is refused instead of running on it.

use glam::Vec2;
use thiserror::Error;

use super::events::SimEvent;
use super::state::{Course, SimState};
use super::tick;
use super::wall::{Wall, WallStyle};

/// Top-level race lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    /// Editing walls, no physics
    Building,
    /// Walls locked, racers staged, not yet moving
    Idle,
    /// Frame step scheduled
    Racing,
    /// Winner recorded, no further ticks
    Finished,
}

/// Editor-facing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("wall index {0} out of range")]
    InvalidIndex(usize),
}

/// Capability to run one scheduled tick; stale after any reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    epoch: u64,
}

/// The race state machine and snapshot owner
pub struct RaceController {
    state: SimState,
    phase: RacePhase,
    epoch: u64,
}

impl RaceController {
    /// New controller in Building with an empty course.
    ///
    /// The course height is the finish threshold and is fixed for the
    /// attempt; pick it before drawing walls.
    pub fn new(seed: u64, course_height: f32) -> Self {
        Self {
            state: SimState::new(seed, Course::new(course_height)),
            phase: RacePhase::Building,
            epoch: 0,
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// The last published snapshot; what the renderer reads
    pub fn snapshot(&self) -> &SimState {
        &self.state
    }

    /// Token for scheduling the next tick against the current world
    pub fn tick_token(&self) -> TickToken {
        TickToken { epoch: self.epoch }
    }

    fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    // --- Editor interface (valid only while Building) ---

    pub fn add_wall(&mut self, a: Vec2, b: Vec2, style: Option<WallStyle>) {
        if self.phase != RacePhase::Building {
            return;
        }
        self.state.course.walls.push(Wall::new(a, b, style));
    }

    /// Remove a wall by index. Out-of-range indices are reported, never
    /// silently ignored: the editor must not lose track of the list.
    pub fn remove_wall(&mut self, index: usize) -> Result<(), EditError> {
        if self.phase != RacePhase::Building {
            return Ok(());
        }
        if index >= self.state.course.walls.len() {
            return Err(EditError::InvalidIndex(index));
        }
        self.state.course.walls.remove(index);
        Ok(())
    }

    pub fn clear_walls(&mut self) {
        if self.phase != RacePhase::Building {
            return;
        }
        self.state.course.walls.clear();
    }

    // --- Lifecycle commands (invalid-state calls are no-ops) ---

    /// Building -> Idle: lock the course and stage the racers
    pub fn lock_course(&mut self) {
        if self.phase != RacePhase::Building {
            return;
        }
        self.state.reset_for_race();
        self.phase = RacePhase::Idle;
        self.bump_epoch();
        log::info!("course locked: {} walls", self.state.course.walls.len());
    }

    /// Idle -> Racing
    pub fn start_race(&mut self) {
        if self.phase != RacePhase::Idle {
            return;
        }
        self.phase = RacePhase::Racing;
        self.bump_epoch();
        log::info!("race started");
    }

    /// Finished -> Building: back to editing, with racers, particles,
    /// camera, winner and all wall damage cleared
    pub fn edit_course(&mut self) {
        if self.phase != RacePhase::Finished {
            return;
        }
        self.state.reset_for_race();
        self.phase = RacePhase::Building;
        self.bump_epoch();
        log::info!("editing course");
    }

    /// Full reset then immediately Racing. Valid once a course is locked
    /// (Idle, Racing or Finished); a course still Building stays put.
    pub fn race_again(&mut self) {
        if self.phase == RacePhase::Building {
            return;
        }
        self.state.reset_for_race();
        self.phase = RacePhase::Racing;
        self.bump_epoch();
        log::info!("race restarted from scratch");
    }

    /// Restart the race in flight: same reset as `race_again` but only
    /// meaningful while Racing; the wall set is untouched, only damage
    /// clears.
    pub fn restart_race(&mut self) {
        if self.phase != RacePhase::Racing {
            return;
        }
        self.state.reset_for_race();
        self.bump_epoch();
        log::info!("race restarted");
    }

    /// Run one scheduled tick.
    ///
    /// Returns the tick's events, or `None` when the tick was refused: a
    /// stale token, a phase other than Racing, or a winner already on the
    /// books (which flips the phase to Finished). A `None` means the host
    /// should stop its loop and wait for the next command.
    pub fn step(&mut self, token: TickToken) -> Option<Vec<SimEvent>> {
        if token.epoch != self.epoch || self.phase != RacePhase::Racing {
            return None;
        }
        if self.state.winner.is_some() {
            self.finish();
            return None;
        }

        let (next, events) = tick::step(&self.state);
        // Publish: the full frame computed against the old snapshot lands
        // in one assignment.
        self.state = next;

        if self.state.winner.is_some() {
            self.finish();
        }
        Some(events)
    }

    fn finish(&mut self) {
        self.phase = RacePhase::Finished;
        self.bump_epoch();
        if let Some(winner) = self.state.winner {
            log::info!("{} wins at tick {}", winner.as_str(), self.state.time_ticks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{RACER_START_Y, VIEWPORT_HEIGHT};
    use crate::sim::state::RacerKind;
    use crate::sim::wall::DamageState;

    fn controller_with_wall() -> RaceController {
        let mut c = RaceController::new(42, 800.0);
        c.add_wall(Vec2::new(100.0, 400.0), Vec2::new(300.0, 400.0), None);
        c
    }

    /// Drive the controller until it finishes, with a tick bound
    fn run_to_finish(c: &mut RaceController, max_ticks: u32) {
        for _ in 0..max_ticks {
            let token = c.tick_token();
            if c.step(token).is_none() {
                break;
            }
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        // Capture transition logging in test output
        let _ = env_logger::builder().is_test(true).try_init();

        let mut c = controller_with_wall();
        assert_eq!(c.phase(), RacePhase::Building);

        c.lock_course();
        assert_eq!(c.phase(), RacePhase::Idle);
        assert_eq!(c.snapshot().racers.len(), 4);

        c.start_race();
        assert_eq!(c.phase(), RacePhase::Racing);

        run_to_finish(&mut c, 20_000);
        assert_eq!(c.phase(), RacePhase::Finished);
        assert!(c.snapshot().winner.is_some());
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut c = controller_with_wall();

        // Can't start or restart from Building
        c.start_race();
        assert_eq!(c.phase(), RacePhase::Building);
        c.restart_race();
        assert_eq!(c.phase(), RacePhase::Building);
        c.race_again();
        assert_eq!(c.phase(), RacePhase::Building);
        c.edit_course();
        assert_eq!(c.phase(), RacePhase::Building);

        c.lock_course();
        // lock_course again is a no-op
        c.lock_course();
        assert_eq!(c.phase(), RacePhase::Idle);

        c.start_race();
        // start_race while Racing is a no-op
        let token = c.tick_token();
        c.start_race();
        assert_eq!(c.phase(), RacePhase::Racing);
        // and did not invalidate the scheduled tick
        assert!(c.step(token).is_some());
    }

    #[test]
    fn test_step_refuses_stale_token() {
        let mut c = controller_with_wall();
        c.lock_course();
        c.start_race();

        let stale = c.tick_token();
        c.restart_race();
        // The reset invalidated the in-flight tick
        assert!(c.step(stale).is_none());
        // A fresh token works
        assert!(c.step(c.tick_token()).is_some());
    }

    #[test]
    fn test_step_outside_racing_is_refused() {
        let mut c = controller_with_wall();
        assert!(c.step(c.tick_token()).is_none());
        c.lock_course();
        assert!(c.step(c.tick_token()).is_none());
    }

    #[test]
    fn test_no_tick_after_finish() {
        let mut c = controller_with_wall();
        c.lock_course();
        c.start_race();
        run_to_finish(&mut c, 20_000);
        assert_eq!(c.phase(), RacePhase::Finished);

        let winner = c.snapshot().winner;
        let ticks = c.snapshot().time_ticks;
        // Finished refuses every tick; the snapshot is frozen
        assert!(c.step(c.tick_token()).is_none());
        assert_eq!(c.snapshot().winner, winner);
        assert_eq!(c.snapshot().time_ticks, ticks);
    }

    #[test]
    fn test_race_again_from_finished() {
        let mut c = controller_with_wall();
        c.lock_course();
        c.start_race();
        run_to_finish(&mut c, 20_000);
        assert_eq!(c.phase(), RacePhase::Finished);

        c.race_again();
        assert_eq!(c.phase(), RacePhase::Racing);

        let s = c.snapshot();
        assert!(s.winner.is_none());
        assert!(s.particles.is_empty());
        assert_eq!(s.camera.offset, VIEWPORT_HEIGHT / 2.0);
        for racer in &s.racers {
            assert_eq!(racer.pos.y, RACER_START_Y);
            assert_eq!(racer.vel.length(), 0.0);
        }
        for wall in &s.course.walls {
            assert_eq!(wall.damage(), DamageState::Intact);
        }
    }

    #[test]
    fn test_restart_keeps_walls_clears_damage() {
        let mut c = controller_with_wall();
        c.lock_course();
        c.start_race();
        // Run a while so the wall takes damage
        for _ in 0..200 {
            let token = c.tick_token();
            if c.step(token).is_none() {
                break;
            }
        }

        c.restart_race();
        assert_eq!(c.phase(), RacePhase::Racing);
        let s = c.snapshot();
        assert_eq!(s.course.walls.len(), 1);
        assert_eq!(s.course.walls[0].damage(), DamageState::Intact);
        assert_eq!(s.time_ticks, 0);
    }

    #[test]
    fn test_edit_course_from_finished() {
        let mut c = controller_with_wall();
        c.lock_course();
        c.start_race();
        run_to_finish(&mut c, 20_000);

        c.edit_course();
        assert_eq!(c.phase(), RacePhase::Building);
        let s = c.snapshot();
        assert!(s.winner.is_none());
        assert!(s.particles.is_empty());
        // Walls survive, damage does not
        assert_eq!(s.course.walls.len(), 1);
        assert_eq!(s.course.walls[0].damage(), DamageState::Intact);

        // Editing is live again
        c.add_wall(Vec2::new(0.0, 500.0), Vec2::new(100.0, 500.0), Some(WallStyle::Neon));
        assert_eq!(c.snapshot().course.walls.len(), 2);
    }

    #[test]
    fn test_remove_wall_invalid_index() {
        let mut c = controller_with_wall();
        assert_eq!(c.remove_wall(5), Err(EditError::InvalidIndex(5)));
        assert_eq!(c.snapshot().course.walls.len(), 1);
        assert_eq!(c.remove_wall(0), Ok(()));
        assert!(c.snapshot().course.walls.is_empty());
    }

    #[test]
    fn test_editor_locked_outside_building() {
        let mut c = controller_with_wall();
        c.lock_course();

        c.add_wall(Vec2::ZERO, Vec2::new(10.0, 0.0), None);
        c.clear_walls();
        assert_eq!(c.remove_wall(0), Ok(()));
        assert_eq!(c.snapshot().course.walls.len(), 1);
    }

    #[test]
    fn test_winner_is_first_in_lineup_order() {
        let mut c = RaceController::new(7, 800.0);
        c.lock_course();
        c.start_race();
        run_to_finish(&mut c, 20_000);
        // Empty course, identical physics: the tie goes to lineup order
        assert_eq!(c.snapshot().winner, Some(RacerKind::Marble));
    }
}
