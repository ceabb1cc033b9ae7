//! The player-controlled bird.

use crate::constants::{BIRD_MAX_ROTATION, BIRD_SIZE};
use crate::difficulty::DifficultyProfile;
use crate::geometry::Rect;

/// Wing animation phase advance per tick (drawing only).
const WING_SPEED: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Bird {
    pub x: f64,
    /// Top edge of the bird. Grows downward.
    pub y: f64,
    /// Vertical velocity in units/tick (positive = downward).
    pub velocity: f64,
    /// Tilt in degrees, positive = nose up. Derived from velocity.
    pub rotation: f64,
    pub wing_phase: f64,
    gravity: f64,
    jump_strength: f64,
}

impl Bird {
    pub fn new(x: f64, y: f64, profile: &DifficultyProfile) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            rotation: 0.0,
            wing_phase: 0.0,
            gravity: profile.gravity,
            jump_strength: profile.jump_strength,
        }
    }

    /// Flap. Overwrites velocity rather than adding to it.
    pub fn jump(&mut self) {
        self.velocity = self.jump_strength;
    }

    /// One physics tick: gravity, position, then tilt.
    pub fn update(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;
        self.wing_phase += WING_SPEED;

        let tilt = -self.velocity * 2.0;
        self.rotation = if self.velocity < 0.0 {
            tilt.min(BIRD_MAX_ROTATION)
        } else {
            tilt.max(-BIRD_MAX_ROTATION)
        };
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BIRD_SIZE, BIRD_SIZE)
    }

    pub fn center(&self) -> (f64, f64) {
        self.rect().center()
    }
}
