//! Drop Derby - a gravity-race physics engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, race state)
//!
//! Rendering, wall-editing UI, maze generation and audio live in host
//! applications; this crate only produces per-tick state snapshots and
//! collision events for them to consume.

pub mod sim;

pub use sim::{RaceController, RacePhase, SimEvent, SimState};

/// Engine tuning constants
///
/// The simulation runs on a fixed tick; all rates below are expressed in
/// units per tick (or per tick squared), not per second.
pub mod consts {
    /// Downward acceleration applied to every racer each tick
    pub const GRAVITY: f32 = 0.1;
    /// Fraction of normal-direction speed retained (reversed) on impact
    pub const RESTITUTION: f32 = 0.70;
    /// Speed cap; velocity is rescaled to this magnitude when exceeded
    pub const MAX_SPEED: f32 = 15.0;

    /// Racer defaults
    pub const RACER_RADIUS: f32 = 20.0;
    /// Vertical start position for the lineup
    pub const RACER_START_Y: f32 = 30.0;

    /// Course dimensions
    pub const COURSE_WIDTH: f32 = 450.0;
    /// Default finish threshold; configurable per course before walls are drawn
    pub const DEFAULT_COURSE_HEIGHT: f32 = 800.0;
    /// Renderer viewport height; the camera never tracks above half of it
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// Exponential smoothing factor for the follow camera
    pub const CAMERA_SMOOTHING: f32 = 0.08;

    /// Extra push-out past the penetration depth so a resolved contact is
    /// not re-detected on the same frame
    pub const SEPARATION_EPSILON: f32 = 0.5;
    /// Minimum impact speed that produces a bounce event
    pub const BOUNCE_EVENT_MIN_SPEED: f32 = 0.5;

    /// Hits required to destroy a wall
    pub const WALL_DESTROY_HITS: u32 = 2;

    /// Debris particle gravity (independent of racer gravity)
    pub const PARTICLE_GRAVITY: f32 = 0.05;
    /// Debris speed range, units/tick
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    /// Debris lifespan range, ticks
    pub const PARTICLE_MIN_LIFE: u32 = 40;
    pub const PARTICLE_MAX_LIFE: u32 = 60;
    /// Debris burst size range per destroyed wall
    pub const BURST_MIN: u32 = 8;
    pub const BURST_MAX: u32 = 12;
}
