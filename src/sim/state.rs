//! Race state and core simulation types
//!
//! The snapshot published each tick lives here. Coordinates grow downward:
//! falling is +y, and a racer wins by exceeding the course height.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::Particle;
use super::wall::Wall;
use crate::consts::*;

/// The fixed roster of racer body shapes; doubles as racer identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacerKind {
    Marble,
    Bolt,
    Wheel,
    Comet,
}

impl RacerKind {
    /// Lineup order; also the tie-break order for simultaneous winners
    pub const ALL: [RacerKind; 4] = [
        RacerKind::Marble,
        RacerKind::Bolt,
        RacerKind::Wheel,
        RacerKind::Comet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RacerKind::Marble => "marble",
            RacerKind::Bolt => "bolt",
            RacerKind::Wheel => "wheel",
            RacerKind::Comet => "comet",
        }
    }
}

/// A competing circular body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Racer {
    pub kind: RacerKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Racer {
    pub fn new(kind: RacerKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: RACER_RADIUS,
        }
    }
}

/// The course: fixed width, configurable finish height, authored walls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub width: f32,
    /// Finish threshold; a racer whose y exceeds this wins
    pub height: f32,
    pub walls: Vec<Wall>,
}

impl Course {
    pub fn new(height: f32) -> Self {
        Self {
            width: COURSE_WIDTH,
            height,
            walls: Vec::new(),
        }
    }
}

impl Default for Course {
    fn default() -> Self {
        Self::new(DEFAULT_COURSE_HEIGHT)
    }
}

/// Smoothed vertical follow of the leading racer.
///
/// Render-only: the offset picks the visible window of the course and has
/// no effect on physics or win detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub offset: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            offset: VIEWPORT_HEIGHT / 2.0,
        }
    }

    /// Ease toward the lead racer, never above the top half-viewport
    pub fn advance(&mut self, lead_y: f32) {
        let target = lead_y.max(VIEWPORT_HEIGHT / 2.0);
        self.offset += (target - self.offset) * CAMERA_SMOOTHING;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete simulation snapshot (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducible debris
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Racers in lineup order (stable iteration order)
    pub racers: Vec<Racer>,
    pub course: Course,
    /// Visual debris (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub camera: Camera,
    /// Set once, on the tick the first racer crosses the finish
    pub winner: Option<RacerKind>,
    /// Next particle ID
    pub(crate) next_particle_id: u32,
}

impl SimState {
    /// Fresh state with racers staged at their start positions
    pub fn new(seed: u64, course: Course) -> Self {
        let racers = starting_lineup(course.width);
        Self {
            seed,
            time_ticks: 0,
            racers,
            course,
            particles: Vec::new(),
            camera: Camera::new(),
            winner: None,
            next_particle_id: 0,
        }
    }

    /// Full reset for a new attempt: racers restaged, particles and winner
    /// cleared, camera re-homed, all wall damage wiped. Walls keep their
    /// geometry.
    pub fn reset_for_race(&mut self) {
        self.racers = starting_lineup(self.course.width);
        self.particles.clear();
        self.camera = Camera::new();
        self.winner = None;
        self.time_ticks = 0;
        self.next_particle_id = 0;
        for wall in &mut self.course.walls {
            wall.reset_damage();
        }
    }
}

/// Stage one racer of each kind, spread evenly across the course width
pub fn starting_lineup(width: f32) -> Vec<Racer> {
    let n = RacerKind::ALL.len();
    RacerKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let x = width * (i + 1) as f32 / (n + 1) as f32;
            Racer::new(kind, Vec2::new(x, RACER_START_Y))
        })
        .collect()
}
