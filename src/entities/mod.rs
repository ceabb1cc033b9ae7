//! Per-entity state and update rules for a round.
//!
//! Each entity owns its own motion; the round decides when to call it
//! (countdown, pause and slow motion all live above this layer).

pub mod bird;
pub mod obstacle;
pub mod particle;
pub mod powerup;

pub use bird::Bird;
pub use obstacle::{Obstacle, ObstacleKind, Oscillation};
pub use particle::{Particle, ParticleSystem};
pub use powerup::{PowerUp, PowerUpKind};

/// Distance moved per tick while slow motion is active: half the normal
/// speed, floored. A speed below 2 therefore stalls completely.
pub fn slowed(speed: f64) -> f64 {
    (speed / 2.0).floor()
}
