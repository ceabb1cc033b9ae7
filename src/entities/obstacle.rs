//! Pipe obstacles, static or vertically oscillating.

use super::slowed;
use crate::constants::{
    MOVING_PIPE_FLIP_TICKS, MOVING_PIPE_SPEED, PIPE_MARGIN, PIPE_WIDTH, SCREEN_HEIGHT,
};
use crate::difficulty::DifficultyProfile;
use crate::geometry::Rect;
use rand::Rng;

/// Vertical oscillation state of a moving pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Oscillation {
    /// +1 moves the gap down, -1 moves it up.
    pub direction: i8,
    pub timer: u32,
}

impl Default for Oscillation {
    fn default() -> Self {
        Self {
            direction: 1,
            timer: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Static,
    Moving(Oscillation),
}

/// A top + bottom pipe pair with a gap between them.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f64,
    /// Height of the top pipe; the gap starts here.
    pub top_height: f64,
    pub gap: f64,
    pub speed: f64,
    /// Set once when the bird has fully passed this pipe.
    pub scored: bool,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Build an obstacle at `x` with a uniformly random gap position.
    pub fn new<R: Rng>(x: f64, kind: ObstacleKind, profile: &DifficultyProfile, rng: &mut R) -> Self {
        let max_top = Self::max_top_height(profile.gap) as i64;
        let top_height = rng.gen_range(PIPE_MARGIN as i64..=max_top) as f64;
        Self::with_top_height(x, top_height, kind, profile)
    }

    /// Build an obstacle with a known gap position.
    pub fn with_top_height(
        x: f64,
        top_height: f64,
        kind: ObstacleKind,
        profile: &DifficultyProfile,
    ) -> Self {
        Self {
            x,
            top_height,
            gap: profile.gap,
            speed: profile.speed,
            scored: false,
            kind,
        }
    }

    pub fn max_top_height(gap: f64) -> f64 {
        SCREEN_HEIGHT - gap - PIPE_MARGIN
    }

    pub fn bottom_y(&self) -> f64 {
        self.top_height + self.gap
    }

    pub fn width(&self) -> f64 {
        PIPE_WIDTH
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.kind, ObstacleKind::Moving(_))
    }

    /// Advance one tick. Under slow motion the pipe only scrolls at the
    /// floored half speed and its oscillation is held.
    pub fn update(&mut self, slow_motion: bool) {
        if slow_motion {
            self.x -= slowed(self.speed);
            return;
        }

        self.x -= self.speed;

        let max_top = Self::max_top_height(self.gap);
        if let ObstacleKind::Moving(osc) = &mut self.kind {
            osc.timer += 1;
            if osc.timer >= MOVING_PIPE_FLIP_TICKS {
                osc.direction = -osc.direction;
                osc.timer = 0;
            }

            self.top_height += f64::from(osc.direction) * MOVING_PIPE_SPEED;

            if self.top_height < PIPE_MARGIN {
                self.top_height = PIPE_MARGIN;
                osc.direction = 1;
            } else if self.top_height > max_top {
                self.top_height = max_top;
                osc.direction = -1;
            }
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.width() < 0.0
    }

    /// True once `bird_x` is strictly past the pipe's right edge.
    pub fn is_passed(&self, bird_x: f64) -> bool {
        bird_x > self.x + self.width()
    }

    /// Collision boxes for the top and bottom pipe.
    pub fn rects(&self) -> (Rect, Rect) {
        let top = Rect::new(self.x, 0.0, self.width(), self.top_height);
        let bottom_y = self.bottom_y();
        let bottom = Rect::new(self.x, bottom_y, self.width(), SCREEN_HEIGHT - bottom_y);
        (top, bottom)
    }

    pub fn collides_with(&self, rect: &Rect) -> bool {
        let (top, bottom) = self.rects();
        rect.intersects(&top) || rect.intersects(&bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn moving(top: f64, direction: i8, timer: u32) -> Obstacle {
        Obstacle::with_top_height(
            800.0,
            top,
            ObstacleKind::Moving(Oscillation { direction, timer }),
            Difficulty::Medium.profile(),
        )
    }

    #[test]
    fn test_random_gap_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for d in Difficulty::ALL {
            let profile = d.profile();
            for _ in 0..200 {
                let pipe = Obstacle::new(800.0, ObstacleKind::Static, profile, &mut rng);
                assert!(pipe.top_height >= PIPE_MARGIN);
                assert!(pipe.top_height <= Obstacle::max_top_height(profile.gap));
                assert_eq!(pipe.bottom_y(), pipe.top_height + profile.gap);
                assert_eq!(pipe.top_height.fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_static_pipe_scrolls_left() {
        let mut pipe = Obstacle::with_top_height(
            800.0,
            200.0,
            ObstacleKind::Static,
            Difficulty::Medium.profile(),
        );
        pipe.update(false);
        assert_eq!(pipe.x, 797.0);
        assert_eq!(pipe.top_height, 200.0);
        pipe.update(true);
        assert_eq!(pipe.x, 796.0);
    }

    #[test]
    fn test_moving_pipe_flips_every_30_ticks() {
        let mut pipe = moving(200.0, 1, 0);
        for _ in 0..29 {
            pipe.update(false);
        }
        assert_eq!(pipe.top_height, 229.0);
        // 30th tick flips before moving
        pipe.update(false);
        assert_eq!(pipe.top_height, 228.0);
        assert_eq!(pipe.kind, ObstacleKind::Moving(Oscillation { direction: -1, timer: 0 }));
    }

    #[test]
    fn test_moving_pipe_clamps_and_flips_at_top() {
        let mut pipe = moving(PIPE_MARGIN, -1, 5);
        pipe.update(false);
        assert_eq!(pipe.top_height, PIPE_MARGIN);
        assert_eq!(pipe.kind, ObstacleKind::Moving(Oscillation { direction: 1, timer: 6 }));
    }

    #[test]
    fn test_moving_pipe_clamps_and_flips_at_bottom() {
        let max = Obstacle::max_top_height(200.0);
        let mut pipe = moving(max, 1, 0);
        pipe.update(false);
        assert_eq!(pipe.top_height, max);
        assert_eq!(pipe.kind, ObstacleKind::Moving(Oscillation { direction: -1, timer: 1 }));
    }

    #[test]
    fn test_moving_pipe_stays_in_range_over_long_run() {
        let max = Obstacle::max_top_height(200.0);
        let mut pipe = moving(60.0, -1, 0);
        for _ in 0..1000 {
            pipe.update(false);
            assert!(pipe.top_height >= PIPE_MARGIN && pipe.top_height <= max);
            assert_eq!(pipe.bottom_y(), pipe.top_height + pipe.gap);
        }
    }

    #[test]
    fn test_slow_motion_holds_oscillation() {
        let mut pipe = moving(200.0, 1, 0);
        pipe.update(true);
        assert_eq!(pipe.top_height, 200.0);
        assert_eq!(pipe.x, 799.0);
    }

    #[test]
    fn test_passed_and_off_screen() {
        let mut pipe = Obstacle::with_top_height(
            100.0,
            200.0,
            ObstacleKind::Static,
            Difficulty::Easy.profile(),
        );
        assert!(!pipe.is_passed(160.0));
        assert!(pipe.is_passed(160.5));
        assert!(!pipe.is_off_screen());
        pipe.x = -60.5;
        assert!(pipe.is_off_screen());
    }

    #[test]
    fn test_rects_cover_top_and_bottom() {
        let pipe = Obstacle::with_top_height(
            300.0,
            150.0,
            ObstacleKind::Static,
            Difficulty::Medium.profile(),
        );
        let (top, bottom) = pipe.rects();
        assert_eq!(top, Rect::new(300.0, 0.0, 60.0, 150.0));
        assert_eq!(bottom, Rect::new(300.0, 350.0, 60.0, 250.0));

        // Inside the gap
        assert!(!pipe.collides_with(&Rect::new(310.0, 200.0, 30.0, 30.0)));
        // Clipping the top pipe
        assert!(pipe.collides_with(&Rect::new(310.0, 140.0, 30.0, 30.0)));
    }
}
