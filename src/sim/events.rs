//! Collision events emitted by the frame step
//!
//! Fire-and-forget notifications for the audio collaborator. Ordering is
//! emission order within a tick; nothing is retained across ticks.

use serde::{Deserialize, Serialize};

use super::wall::WallStyle;

/// What a racer bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Left/right course boundary
    CourseEdge,
    /// A drawn wall segment
    Wall,
}

/// A single collision notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Impact that reflected a racer without breaking anything.
    /// Intensity is the impact speed along the collision normal.
    Bounce { intensity: f32, surface: SurfaceKind },
    /// Impact that pushed a wall over its damage limit
    Break {
        intensity: f32,
        style: Option<WallStyle>,
    },
}
