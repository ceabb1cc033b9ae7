//! Timer-driven procedural generation of obstacles and power-ups.

use crate::constants::{
    MOVING_PIPE_CHANCE, POWERUP_SPAWN_INTERVAL, POWERUP_SPAWN_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::difficulty::DifficultyProfile;
use crate::entities::{Obstacle, ObstacleKind, Oscillation, PowerUp, PowerUpKind};
use rand::Rng;

/// What the spawner produced this tick.
#[derive(Debug, Default)]
pub struct Spawned {
    pub obstacle: Option<Obstacle>,
    pub powerup: Option<PowerUp>,
}

/// Tick counters for the two spawn streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spawner {
    pub pipe_timer: u32,
    pub powerup_timer: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance both counters one tick and emit whatever became due.
    ///
    /// The power-up counter only runs when the profile enables power-ups.
    pub fn tick<R: Rng>(&mut self, profile: &DifficultyProfile, rng: &mut R) -> Spawned {
        let mut spawned = Spawned::default();

        self.pipe_timer += 1;
        if self.pipe_timer >= profile.spawn_interval {
            spawned.obstacle = Some(spawn_obstacle(profile, rng));
            self.pipe_timer = 0;
        }

        if profile.has_powerups {
            self.powerup_timer += 1;
            if self.powerup_timer >= POWERUP_SPAWN_INTERVAL {
                spawned.powerup = Some(spawn_powerup(rng));
                self.powerup_timer = 0;
            }
        }

        spawned
    }
}

/// New obstacle at the right edge. With moving pipes enabled, each spawn
/// independently has a 40% chance to oscillate.
pub fn spawn_obstacle<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> Obstacle {
    let kind = if profile.has_moving_pipes && rng.gen_bool(MOVING_PIPE_CHANCE) {
        ObstacleKind::Moving(Oscillation::default())
    } else {
        ObstacleKind::Static
    };
    Obstacle::new(SCREEN_WIDTH, kind, profile, rng)
}

/// New power-up of a random kind at the right edge, at a random height.
pub fn spawn_powerup<R: Rng>(rng: &mut R) -> PowerUp {
    let min_y = POWERUP_SPAWN_MARGIN as i64;
    let max_y = (SCREEN_HEIGHT - POWERUP_SPAWN_MARGIN) as i64;
    let y = rng.gen_range(min_y..=max_y) as f64;
    PowerUp::new(SCREEN_WIDTH, y, PowerUpKind::random(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pipe_spawns_on_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut spawner = Spawner::new();
        let profile = Difficulty::Medium.profile();

        for _ in 0..89 {
            assert!(spawner.tick(profile, &mut rng).obstacle.is_none());
        }
        let spawned = spawner.tick(profile, &mut rng);
        let pipe = spawned.obstacle.expect("pipe due on tick 90");
        assert_eq!(pipe.x, SCREEN_WIDTH);
        assert!(!pipe.scored);
        assert_eq!(spawner.pipe_timer, 0);
    }

    #[test]
    fn test_easy_never_spawns_powerups_or_moving_pipes() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut spawner = Spawner::new();
        let profile = Difficulty::Easy.profile();
        for _ in 0..3000 {
            let spawned = spawner.tick(profile, &mut rng);
            assert!(spawned.powerup.is_none());
            if let Some(pipe) = spawned.obstacle {
                assert!(!pipe.is_moving());
            }
        }
        assert_eq!(spawner.powerup_timer, 0);
    }

    #[test]
    fn test_powerup_spawns_every_300_ticks() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut spawner = Spawner::new();
        let profile = Difficulty::Hard.profile();
        let mut spawned_at = Vec::new();
        for tick in 1..=900 {
            if let Some(p) = spawner.tick(profile, &mut rng).powerup {
                assert!(p.y >= 100.0 && p.y <= 500.0);
                assert_eq!(p.x, SCREEN_WIDTH);
                spawned_at.push(tick);
            }
        }
        assert_eq!(spawned_at, vec![300, 600, 900]);
    }

    #[test]
    fn test_moving_pipe_share_is_roughly_forty_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let profile = Difficulty::Medium.profile();
        let moving = (0..2000)
            .filter(|_| spawn_obstacle(profile, &mut rng).is_moving())
            .count();
        assert!((600..1000).contains(&moving), "moving pipes: {moving}");
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let profile = Difficulty::Hard.profile();
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..20 {
            let pa = spawn_obstacle(profile, &mut a);
            let pb = spawn_obstacle(profile, &mut b);
            assert_eq!(pa.top_height, pb.top_height);
            assert_eq!(pa.kind, pb.kind);
        }
    }
}
