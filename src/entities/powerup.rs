//! Collectible power-ups.

use super::slowed;
use crate::constants::{POWERUP_ANIMATION_STEP, POWERUP_SIZE, POWERUP_SPEED};
use crate::geometry::Rect;
use crate::services::Color;
use rand::Rng;

/// The temporary effect a power-up grants on collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Shield,
    SlowMotion,
    DoubleScore,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::SlowMotion,
        PowerUpKind::DoubleScore,
    ];

    /// Pick a kind uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Shield => "Shield",
            Self::SlowMotion => "Slow motion",
            Self::DoubleScore => "Double score",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Shield => Color::BLUE,
            Self::SlowMotion => Color::YELLOW,
            Self::DoubleScore => Color::RED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    /// Centre of the power-up.
    pub x: f64,
    pub y: f64,
    pub kind: PowerUpKind,
    pub collected: bool,
    /// Animation phase, drives the glow only.
    pub phase: f64,
}

impl PowerUp {
    pub fn new(x: f64, y: f64, kind: PowerUpKind) -> Self {
        Self {
            x,
            y,
            kind,
            collected: false,
            phase: 0.0,
        }
    }

    pub fn update(&mut self, slow_motion: bool) {
        if slow_motion {
            self.x -= slowed(POWERUP_SPEED);
            return;
        }
        self.x -= POWERUP_SPEED;
        self.phase += POWERUP_ANIMATION_STEP;
    }

    /// Glow intensity in [0, 1].
    pub fn glow(&self) -> f64 {
        self.phase.sin() * 0.5 + 0.5
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.x, self.y, POWERUP_SIZE, POWERUP_SIZE)
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + POWERUP_SIZE < 0.0
    }
}
