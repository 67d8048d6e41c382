//! Deterministic simulation module
//!
//! All race logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (constants are per tick, no dt)
//! - Seeded RNG only
//! - Stable iteration order (racers in lineup order, walls by index)
//! - No rendering or platform dependencies
//!
//! Each tick is a pure function from the previous snapshot to the next
//! one; the controller publishes the result atomically, so external
//! observers never see partial state.

pub mod collision;
pub mod controller;
pub mod events;
pub mod geometry;
pub mod particles;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wall;

pub use collision::{HitLedger, cap_speed, resolve_course_edges, resolve_walls};
pub use controller::{EditError, RaceController, RacePhase, TickToken};
pub use events::{SimEvent, SurfaceKind};
pub use geometry::{SegmentContact, circle_overlaps_segment, closest_point_on_segment};
pub use particles::Particle;
pub use snapshot::RenderSnapshot;
pub use state::{Camera, Course, Racer, RacerKind, SimState};
pub use tick::step;
pub use wall::{DamageState, Wall, WallStyle};
