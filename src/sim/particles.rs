//! Debris particles spawned when walls break
//!
//! Purely visual: particles never collide with anything and never feed
//! back into racer physics. They carry their own, weaker gravity.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A short-lived debris point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining; removed at 0
    pub lifespan: u32,
    /// Initial lifespan, kept so the renderer can compute a fade ratio
    pub max_lifespan: u32,
    pub size: f32,
}

impl Particle {
    /// 1.0 when fresh, 0.0 when expired
    pub fn fade_ratio(&self) -> f32 {
        if self.max_lifespan == 0 {
            return 0.0;
        }
        self.lifespan as f32 / self.max_lifespan as f32
    }
}

/// Spawn a debris burst at a destroyed wall's midpoint.
///
/// Deterministic: the RNG is seeded from the run seed, the tick the wall
/// broke on, and the wall's index, so replays produce identical debris.
/// `next_id` is the state's particle id counter, advanced per particle.
pub fn spawn_burst(seed: u64, tick: u64, wall_index: usize, at: Vec2, next_id: &mut u32) -> Vec<Particle> {
    let mut rng = Pcg32::seed_from_u64(seed ^ (tick << 16) ^ wall_index as u64);
    let count = rng.random_range(BURST_MIN..=BURST_MAX);

    (0..count)
        .map(|_| {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
            let lifespan = rng.random_range(PARTICLE_MIN_LIFE..PARTICLE_MAX_LIFE);
            let size = rng.random_range(2.0..5.0);
            let id = *next_id;
            *next_id = next_id.wrapping_add(1);
            Particle {
                id,
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                lifespan,
                max_lifespan: lifespan,
                size,
            }
        })
        .collect()
}

/// Advance every live particle by one tick and drop the expired ones
pub fn integrate(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.lifespan = p.lifespan.saturating_sub(1);
    }
    particles.retain(|p| p.lifespan > 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_size_and_placement() {
        let mut next_id = 0;
        let at = Vec2::new(200.0, 400.0);
        let burst = spawn_burst(42, 10, 0, at, &mut next_id);
        assert!((BURST_MIN..=BURST_MAX).contains(&(burst.len() as u32)));
        assert_eq!(next_id as usize, burst.len());
        for p in &burst {
            assert_eq!(p.pos, at);
            let speed = p.vel.length();
            assert!(speed >= PARTICLE_MIN_SPEED && speed < PARTICLE_MAX_SPEED + 1e-3);
            assert!((PARTICLE_MIN_LIFE..PARTICLE_MAX_LIFE).contains(&p.lifespan));
            assert_eq!(p.lifespan, p.max_lifespan);
        }
    }

    #[test]
    fn test_burst_is_deterministic() {
        let mut ids_a = 0;
        let mut ids_b = 0;
        let at = Vec2::ZERO;
        let a = spawn_burst(7, 99, 3, at, &mut ids_a);
        let b = spawn_burst(7, 99, 3, at, &mut ids_b);
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.vel, pb.vel);
            assert_eq!(pa.lifespan, pb.lifespan);
        }
    }

    #[test]
    fn test_integrate_moves_and_expires() {
        let mut particles = vec![Particle {
            id: 0,
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            lifespan: 2,
            max_lifespan: 2,
            size: 3.0,
        }];

        integrate(&mut particles);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].pos, Vec2::new(1.0, 0.0));
        // Particle gravity pulls debris down
        assert!(particles[0].vel.y > 0.0);
        assert_eq!(particles[0].lifespan, 1);

        integrate(&mut particles);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_fade_ratio() {
        let p = Particle {
            id: 0,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            lifespan: 25,
            max_lifespan: 50,
            size: 3.0,
        };
        assert!((p.fade_ratio() - 0.5).abs() < 1e-6);
    }
}
