//! Difficulty presets and their tuning parameters.

use serde::{Deserialize, Serialize};

/// Difficulty levels, selected once per round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Tunable parameters for one difficulty level.
///
/// Speeds, gravity and jump strength are per tick; the gap and spawn
/// interval are in world units and ticks respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub speed: f64,
    pub gap: f64,
    pub spawn_interval: u32,
    pub gravity: f64,
    /// Velocity override on flap (negative = upward).
    pub jump_strength: f64,
    pub has_moving_pipes: bool,
    pub has_powerups: bool,
    /// Carried for parity with the presets; no obstacle type consumes it yet.
    pub has_obstacles: bool,
}

const EASY: DifficultyProfile = DifficultyProfile {
    speed: 1.5,
    gap: 200.0,
    spawn_interval: 150,
    gravity: 0.5,
    jump_strength: -8.0,
    has_moving_pipes: false,
    has_powerups: false,
    has_obstacles: false,
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    speed: 3.0,
    gap: 200.0,
    spawn_interval: 90,
    gravity: 0.8,
    jump_strength: -12.0,
    has_moving_pipes: true,
    has_powerups: true,
    has_obstacles: true,
};

const HARD: DifficultyProfile = DifficultyProfile {
    speed: 4.5,
    gap: 130.0,
    spawn_interval: 70,
    gravity: 1.0,
    jump_strength: -14.0,
    has_moving_pipes: true,
    has_powerups: true,
    has_obstacles: true,
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Look up a difficulty by menu position.
    ///
    /// # Panics
    /// Panics if `index` is outside `0..3`. Menu cursors wrap modulo the
    /// item count, so an out-of-range index is a caller bug.
    pub fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(d) => *d,
            None => panic!("difficulty index {index} out of range 0..{}", Self::ALL.len()),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Easy => "Wide gaps, slow pipes. Good for beginners",
            Self::Medium => "Balanced challenge with moving pipes and power-ups",
            Self::Hard => "Narrow gaps, fast pipes. Very demanding",
        }
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        match self {
            Self::Easy => &EASY,
            Self::Medium => &MEDIUM,
            Self::Hard => &HARD,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected easy, medium or hard)")),
        }
    }
}
