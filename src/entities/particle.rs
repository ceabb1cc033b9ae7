//! Short-lived explosion particles.

use crate::constants::{PARTICLE_GRAVITY, PARTICLE_JITTER, PARTICLE_LIFE};
use crate::services::Color;
use rand::Rng;
use std::f64::consts::TAU;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub color: Color,
    pub life: u32,
    pub max_life: u32,
    pub size: u32,
}

impl Particle {
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
        self.vx += rng.gen_range(-PARTICLE_JITTER..=PARTICLE_JITTER);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Remaining life as a fraction of the starting life.
    pub fn life_fraction(&self) -> f64 {
        if self.max_life == 0 {
            return 0.0;
        }
        f64::from(self.life) / f64::from(self.max_life)
    }

    /// Current radius; shrinks with remaining life.
    pub fn radius(&self) -> f64 {
        (f64::from(self.size) * self.life_fraction()).floor()
    }

    /// Current colour with alpha faded by remaining life.
    pub fn faded_color(&self) -> Color {
        self.color.with_alpha((255.0 * self.life_fraction()) as u8)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Burst of `count` particles flying out from `(x, y)`.
    pub fn add_explosion<R: Rng>(&mut self, x: f64, y: f64, color: Color, count: usize, rng: &mut R) {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(2.0..6.0);
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                color,
                life: PARTICLE_LIFE,
                max_life: PARTICLE_LIFE,
                size: rng.gen_range(2..=5),
            });
        }
    }

    /// Prune dead particles, then advance the rest one tick.
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        self.particles.retain(Particle::is_alive);
        for particle in &mut self.particles {
            particle.update(rng);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_explosion_spawns_requested_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut system = ParticleSystem::new();
        system.add_explosion(100.0, 100.0, Color::RED, 15, &mut rng);
        assert_eq!(system.len(), 15);
        for p in system.iter() {
            let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
            assert!((2.0..6.0).contains(&speed));
            assert!((2..=5).contains(&p.size));
            assert_eq!(p.life, PARTICLE_LIFE);
        }
    }

    #[test]
    fn test_particles_expire_after_their_life() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut system = ParticleSystem::new();
        system.add_explosion(0.0, 0.0, Color::YELLOW, 4, &mut rng);

        for _ in 0..PARTICLE_LIFE {
            system.update(&mut rng);
        }
        assert!(system.iter().all(|p| !p.is_alive()));

        // Next update prunes them
        system.update(&mut rng);
        assert!(system.is_empty());
    }

    #[test]
    fn test_particle_falls_and_fades() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut p = Particle {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            color: Color::WHITE,
            life: 10,
            max_life: 10,
            size: 4,
        };
        p.update(&mut rng);
        assert!((p.vy - PARTICLE_GRAVITY).abs() < 1e-9);
        assert_eq!(p.life, 9);
        assert!(p.vx.abs() <= PARTICLE_JITTER);
        assert_eq!(p.radius(), 3.0);
        assert!(p.faded_color().a < 255);
    }
}
