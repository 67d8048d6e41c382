//! Wall segments and the damage state machine
//!
//! A wall soaks up one hit (Intact -> Damaged) and breaks on the second
//! (Damaged -> Destroyed). Destroyed walls are soft-deleted: their
//! geometry stays in the list so the renderer can animate the wreck, but
//! the collision loop filters them out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::WALL_DESTROY_HITS;

/// Cosmetic wall material tag; never consulted by physics, forwarded to
/// break events so the audio collaborator can vary the crunch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallStyle {
    Wood,
    Stone,
    Neon,
}

/// Damage classification derived from the hit counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageState {
    Intact,
    Damaged,
    Destroyed,
}

/// A line-segment obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub a: Vec2,
    pub b: Vec2,
    pub style: Option<WallStyle>,
    /// Registered collisions this race attempt; monotonic until reset
    #[serde(default)]
    pub hits: u32,
}

impl Wall {
    pub fn new(a: Vec2, b: Vec2, style: Option<WallStyle>) -> Self {
        Self {
            a,
            b,
            style,
            hits: 0,
        }
    }

    /// Current damage state
    pub fn damage(&self) -> DamageState {
        match self.hits {
            0 => DamageState::Intact,
            h if h < WALL_DESTROY_HITS => DamageState::Damaged,
            _ => DamageState::Destroyed,
        }
    }

    /// Destroyed walls are inert: no collision, no further damage
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.hits >= WALL_DESTROY_HITS
    }

    /// Zero-length walls never collide
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        (self.b - self.a).length_squared() < 1e-6
    }

    /// Midpoint, where the debris burst spawns on destruction
    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.a + self.b) * 0.5
    }

    /// Clear damage for a fresh race attempt
    pub fn reset_damage(&mut self) {
        self.hits = 0;
    }
}
