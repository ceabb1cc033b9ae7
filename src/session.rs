//! Process-lifetime context shared across rounds.
//!
//! Holds everything that outlives a single round: the high score, the
//! random source, the chosen difficulty and the audio settings.

use crate::constants::{DEFAULT_MUSIC_VOLUME, DEFAULT_SOUND_VOLUME, TICKS_PER_SECOND, VOLUME_STEP};
use crate::difficulty::Difficulty;
use crate::services::{AudioService, Sound, VolumeKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub sound_volume: f32,
    pub music_volume: f32,
    pub sound_enabled: bool,
    pub music_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sound_volume: DEFAULT_SOUND_VOLUME,
            music_volume: DEFAULT_MUSIC_VOLUME,
            sound_enabled: true,
            music_enabled: true,
        }
    }
}

impl AudioSettings {
    /// Clamp both volumes into [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            sound_volume: self.sound_volume.clamp(0.0, 1.0),
            music_volume: self.music_volume.clamp(0.0, 1.0),
            ..self
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub high_score: u32,
    pub rng: ChaCha8Rng,
    pub difficulty: Difficulty,
    pub audio: AudioSettings,
    /// Simulation ticks per second the loop is paced at.
    pub tick_rate: u32,
}

impl Session {
    /// A fresh session. `None` seeds from entropy.
    pub fn new(seed: Option<u64>, difficulty: Difficulty, audio: AudioSettings) -> Self {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        tracing::debug!(seed, "session rng seeded");
        Self {
            high_score: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            difficulty,
            audio: audio.clamped(),
            tick_rate: TICKS_PER_SECOND,
        }
    }

    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate.max(1);
        self
    }

    /// Seeded session with default settings.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed), Difficulty::default(), AudioSettings::default())
    }

    /// Raise the high score if `score` beats it. Returns true on a new record.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            return true;
        }
        false
    }

    /// Push the current volumes to the audio backend.
    pub fn apply_volumes(&self, audio: &mut dyn AudioService) {
        audio.set_volume(VolumeKind::Sound, self.audio.sound_volume);
        audio.set_volume(VolumeKind::Music, self.audio.music_volume);
    }

    pub fn play(&self, audio: &mut dyn AudioService, sound: Sound) {
        if self.audio.sound_enabled {
            audio.play_sound(sound);
        }
    }

    pub fn start_music(&self, audio: &mut dyn AudioService) {
        if self.audio.music_enabled {
            audio.play_music(true);
        }
    }

    pub fn set_sound_volume(&mut self, audio: &mut dyn AudioService, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if volume != self.audio.sound_volume {
            self.audio.sound_volume = volume;
            audio.set_volume(VolumeKind::Sound, volume);
        }
    }

    /// Move the sound volume by whole keyboard steps, landing on the
    /// 0.1 grid so repeated steps reach exactly 0 and 1.
    pub fn step_sound_volume(&mut self, audio: &mut dyn AudioService, steps: i32) {
        let grid = (self.audio.sound_volume / VOLUME_STEP).round() as i32 + steps;
        self.set_sound_volume(audio, grid as f32 * VOLUME_STEP);
    }

    pub fn toggle_sound(&mut self) {
        self.audio.sound_enabled = !self.audio.sound_enabled;
    }

    pub fn toggle_music(&mut self, audio: &mut dyn AudioService) {
        self.audio.music_enabled = !self.audio.music_enabled;
        if !self.audio.music_enabled {
            audio.stop_music();
        }
    }
}
