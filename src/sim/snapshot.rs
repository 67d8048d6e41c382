//! Renderer-facing snapshot views
//!
//! Flat, serializable projections of the simulation state, shaped the way
//! the renderer consumes them. Destroyed walls are included: their
//! geometry is soft-deleted, and the renderer animates the wreck from the
//! hit count.

use serde::Serialize;

use super::state::{RacerKind, SimState};

#[derive(Debug, Clone, Serialize)]
pub struct RacerView {
    pub id: RacerKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WallView {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub hit_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub lifespan: u32,
    pub max_lifespan: u32,
}

/// One tick's worth of everything the renderer needs
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub racers: Vec<RacerView>,
    pub walls: Vec<WallView>,
    pub particles: Vec<ParticleView>,
    pub camera: f32,
    pub winner: Option<RacerKind>,
}

impl RenderSnapshot {
    pub fn from_state(state: &SimState) -> Self {
        Self {
            racers: state
                .racers
                .iter()
                .map(|r| RacerView {
                    id: r.kind,
                    x: r.pos.x,
                    y: r.pos.y,
                    vx: r.vel.x,
                    vy: r.vel.y,
                    radius: r.radius,
                })
                .collect(),
            walls: state
                .course
                .walls
                .iter()
                .map(|w| WallView {
                    x1: w.a.x,
                    y1: w.a.y,
                    x2: w.b.x,
                    y2: w.b.y,
                    hit_count: w.hits,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    size: p.size,
                    lifespan: p.lifespan,
                    max_lifespan: p.max_lifespan,
                })
                .collect(),
            camera: state.camera.offset,
            winner: state.winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Course;
    use crate::sim::wall::Wall;
    use glam::Vec2;

    #[test]
    fn test_snapshot_includes_destroyed_walls() {
        let mut course = Course::default();
        let mut wall = Wall::new(Vec2::new(100.0, 400.0), Vec2::new(300.0, 400.0), None);
        wall.hits = 2;
        course.walls.push(wall);

        let state = SimState::new(1, course);
        let view = RenderSnapshot::from_state(&state);
        assert_eq!(view.walls.len(), 1);
        assert_eq!(view.walls[0].hit_count, 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = SimState::new(1, Course::default());
        let view = RenderSnapshot::from_state(&state);
        let json = serde_json::to_string(&view).expect("snapshot serializes");
        assert!(json.contains("\"racers\""));
        assert!(json.contains("\"camera\""));
        assert!(json.contains("\"Marble\""));
    }
}
