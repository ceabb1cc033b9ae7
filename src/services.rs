//! Narrow interfaces to the collaborators the core drives: drawing, audio
//! and optional assets. The core never inspects whether a call succeeded.

use crate::geometry::Rect;
use std::collections::HashMap;

/// RGBA colour. Alpha below 255 asks the renderer to blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const SKY_BLUE: Color = Color::rgb(135, 206, 235);
    pub const DARK_GREEN: Color = Color::rgb(0, 150, 0);
    pub const PIPE_GREEN: Color = Color::rgb(0, 190, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// How a shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid,
    /// Outline only, with a stroke width in world units.
    Outline(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Normal,
    Title,
    Large,
    Huge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `(x, y)` is the top-left corner of the text.
    Left,
    /// `(x, y)` is the centre of the text.
    Center,
}

/// Handle for an image resolved by an [`AssetProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageId(pub String);

/// Drawing primitives in world coordinates. Pixel detail is the renderer's.
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color, fill: Fill);
    fn draw_circle(&mut self, center: (f64, f64), radius: f64, color: Color, fill: Fill);
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color);
    fn draw_text(&mut self, text: &str, pos: (f64, f64), size: TextSize, color: Color, align: Align);
    /// Draw an image into `rect`, rotated by `rotation` degrees.
    fn blit_image(&mut self, image: &ImageId, rect: Rect, rotation: f64);
}

/// Named sound effects the core asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Jump,
    Score,
    Crash,
    PowerUp,
    MenuSelect,
    MenuConfirm,
    Countdown,
}

impl Sound {
    pub const ALL: [Sound; 7] = [
        Self::Jump,
        Self::Score,
        Self::Crash,
        Self::PowerUp,
        Self::MenuSelect,
        Self::MenuConfirm,
        Self::Countdown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Score => "score",
            Self::Crash => "crash",
            Self::PowerUp => "powerup",
            Self::MenuSelect => "menu_select",
            Self::MenuConfirm => "menu_confirm",
            Self::Countdown => "countdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeKind {
    Sound,
    Music,
}

/// Fire-and-forget audio.
pub trait AudioService {
    fn play_sound(&mut self, sound: Sound);
    fn play_music(&mut self, looped: bool);
    fn stop_music(&mut self);
    fn set_volume(&mut self, kind: VolumeKind, level: f32);
}

/// Handle for a sound clip resolved by an [`AssetProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundId(pub String);

/// Optional named assets. `None` means "use the built-in fallback".
pub trait AssetProvider {
    fn image(&self, name: &str) -> Option<ImageId>;
    fn sound(&self, name: &str) -> Option<SoundId>;
}

/// Audio backend that only records requests in the log.
#[derive(Debug, Default)]
pub struct LogAudio {
    music_playing: bool,
    clips: HashMap<Sound, SoundId>,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every named sound once. Sounds without a clip fall back to
    /// built-in synthesis.
    pub fn load(assets: &dyn AssetProvider) -> Self {
        let clips: HashMap<Sound, SoundId> = Sound::ALL
            .into_iter()
            .filter_map(|sound| assets.sound(sound.name()).map(|clip| (sound, clip)))
            .collect();
        tracing::debug!(
            loaded = clips.len(),
            synthesized = Sound::ALL.len() - clips.len(),
            "sound clips resolved"
        );
        Self {
            music_playing: false,
            clips,
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn clip(&self, sound: Sound) -> Option<&SoundId> {
        self.clips.get(&sound)
    }
}

impl AudioService for LogAudio {
    fn play_sound(&mut self, sound: Sound) {
        match self.clips.get(&sound) {
            Some(clip) => tracing::trace!(sound = sound.name(), clip = %clip.0, "play sound"),
            None => tracing::trace!(sound = sound.name(), "play synthesized sound"),
        }
    }

    fn play_music(&mut self, looped: bool) {
        self.music_playing = true;
        tracing::debug!(looped, "music started");
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            tracing::debug!("music stopped");
        }
        self.music_playing = false;
    }

    fn set_volume(&mut self, kind: VolumeKind, level: f32) {
        tracing::debug!(?kind, level, "volume changed");
    }
}

/// Asset provider with nothing in it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn image(&self, name: &str) -> Option<ImageId> {
        tracing::trace!(name, "no image asset, using built-in drawing");
        None
    }

    fn sound(&self, name: &str) -> Option<SoundId> {
        tracing::trace!(name, "no sound asset, using built-in synthesis");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_names_are_stable() {
        assert_eq!(Sound::Jump.name(), "jump");
        assert_eq!(Sound::MenuConfirm.name(), "menu_confirm");
        assert_eq!(Sound::PowerUp.name(), "powerup");
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let c = Color::RED.with_alpha(10);
        assert_eq!((c.r, c.g, c.b, c.a), (255, 0, 0, 10));
    }

    #[test]
    fn test_log_audio_tracks_music() {
        let mut audio = LogAudio::new();
        audio.play_music(true);
        assert!(audio.music_playing());
        audio.stop_music();
        assert!(!audio.music_playing());
    }

    #[test]
    fn test_no_assets_has_nothing() {
        assert!(NoAssets.image("bird").is_none());
        assert!(NoAssets.sound("jump").is_none());
        let audio = LogAudio::load(&NoAssets);
        assert!(Sound::ALL.iter().all(|s| audio.clip(*s).is_none()));
    }

    struct JumpOnly;

    impl AssetProvider for JumpOnly {
        fn image(&self, _name: &str) -> Option<ImageId> {
            None
        }

        fn sound(&self, name: &str) -> Option<SoundId> {
            (name == "jump").then(|| SoundId("jump.wav".to_string()))
        }
    }

    #[test]
    fn test_log_audio_resolves_available_clips() {
        let mut audio = LogAudio::load(&JumpOnly);
        assert_eq!(audio.clip(Sound::Jump), Some(&SoundId("jump.wav".to_string())));
        assert!(audio.clip(Sound::Crash).is_none());

        audio.play_sound(Sound::Jump);
        audio.play_sound(Sound::Crash);
        assert!(!audio.music_playing());
    }
}
