//! Screen state machine: which input and update logic runs each frame.
//!
//! ```text
//! Menu ──start──▶ Playing ──crash──▶ GameOver ──retry──▶ Playing
//!  │  ▲              │ ▲                 │
//!  │  └──back────────┼─┼─────────────────┘
//!  ▼                 └─┘ pause toggle (Esc), q while paused → Menu
//! Settings ◀──back── DifficultySelect ──select──▶ Playing
//! ```

use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::input::Command;
use crate::menu::{self, MainItem, MenuCursor, SettingsItem};
use crate::round::{Round, RoundEvent};
use crate::services::{AudioService, Sound};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    DifficultySelect,
    Settings,
    Playing,
    GameOver,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::DifficultySelect => "difficulty_select",
            Self::Settings => "settings",
            Self::Playing => "playing",
            Self::GameOver => "game_over",
        }
    }
}

/// Top-level game state. Owns the current round, if any.
#[derive(Debug)]
pub struct Game {
    mode: GameMode,
    paused: bool,
    round: Option<Round>,
    menu_cursor: MenuCursor,
    settings_cursor: MenuCursor,
    difficulty_cursor: MenuCursor,
    dragging_slider: bool,
    running: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            mode: GameMode::Menu,
            paused: false,
            round: None,
            menu_cursor: MenuCursor::new(),
            settings_cursor: MenuCursor::new(),
            difficulty_cursor: MenuCursor::new(),
            dragging_slider: false,
            running: true,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    pub fn menu_cursor(&self) -> &MenuCursor {
        &self.menu_cursor
    }

    pub fn settings_cursor(&self) -> &MenuCursor {
        &self.settings_cursor
    }

    pub fn difficulty_cursor(&self) -> &MenuCursor {
        &self.difficulty_cursor
    }

    pub fn is_dragging_slider(&self) -> bool {
        self.dragging_slider
    }

    /// Apply one input command.
    pub fn handle_command(
        &mut self,
        command: Command,
        session: &mut Session,
        audio: &mut dyn AudioService,
    ) {
        if command == Command::Quit {
            self.terminate();
            return;
        }

        match self.mode {
            GameMode::Menu => self.handle_menu(command, session, audio),
            GameMode::Settings => self.handle_settings(command, session, audio),
            GameMode::DifficultySelect => self.handle_difficulty(command, session, audio),
            GameMode::Playing => self.handle_playing(command, session, audio),
            GameMode::GameOver => self.handle_game_over(command, session, audio),
        }
    }

    /// One simulation step for the current mode.
    ///
    /// Only an unpaused Playing round simulates. On the game-over screen the
    /// crash burst keeps animating; everything else is static.
    pub fn update(&mut self, session: &mut Session, audio: &mut dyn AudioService) {
        match self.mode {
            GameMode::Playing if !self.paused => {
                let Some(round) = self.round.as_mut() else {
                    return;
                };
                let events = round.step(session);
                for event in events {
                    self.apply_round_event(event, session, audio);
                }
            }
            GameMode::GameOver => {
                if let Some(round) = self.round.as_mut() {
                    round.animate_particles(session);
                }
            }
            _ => {}
        }
    }

    /// Begin a fresh round at the session's difficulty.
    pub fn start_round(&mut self, session: &mut Session, audio: &mut dyn AudioService) {
        self.round = Some(Round::new(session.difficulty));
        self.paused = false;
        self.dragging_slider = false;
        self.set_mode(GameMode::Playing);
        tracing::info!(difficulty = session.difficulty.name(), "round started");
        session.play(audio, Sound::MenuConfirm);
        session.start_music(audio);
    }

    /// Leave for the main menu, discarding the round.
    pub fn return_to_menu(&mut self, audio: &mut dyn AudioService) {
        if self.round.take().is_some() {
            audio.stop_music();
        }
        self.paused = false;
        self.set_mode(GameMode::Menu);
    }

    fn terminate(&mut self) {
        tracing::info!(mode = self.mode.name(), "quit requested");
        self.running = false;
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            tracing::debug!(from = self.mode.name(), to = mode.name(), "mode change");
            self.dragging_slider = false;
        }
        self.mode = mode;
    }

    fn apply_round_event(
        &mut self,
        event: RoundEvent,
        session: &mut Session,
        audio: &mut dyn AudioService,
    ) {
        match event {
            RoundEvent::CountdownLabel(Countdown::GO) | RoundEvent::CountdownFinished => {
                session.play(audio, Sound::MenuConfirm);
            }
            RoundEvent::CountdownLabel(_) => session.play(audio, Sound::Countdown),
            RoundEvent::Scored { .. } => session.play(audio, Sound::Score),
            RoundEvent::PowerUpCollected(_) => session.play(audio, Sound::PowerUp),
            RoundEvent::EffectExpired(_) => {}
            RoundEvent::Crashed(_) => {
                session.play(audio, Sound::Crash);
                audio.stop_music();
                self.set_mode(GameMode::GameOver);
            }
        }
    }

    fn flap(&mut self, session: &mut Session, audio: &mut dyn AudioService) {
        if self.paused {
            return;
        }
        if let Some(round) = self.round.as_mut() {
            round.jump();
            session.play(audio, Sound::Jump);
        }
    }

    fn handle_menu(&mut self, command: Command, session: &mut Session, audio: &mut dyn AudioService) {
        match command {
            Command::Action => self.start_round(session, audio),
            Command::Confirm => {
                session.play(audio, Sound::MenuConfirm);
                self.activate_main(MainItem::from_index(self.menu_cursor.selected()), session, audio);
            }
            Command::Up => {
                self.menu_cursor.up();
                session.play(audio, Sound::MenuSelect);
            }
            Command::Down => {
                self.menu_cursor.down();
                session.play(audio, Sound::MenuSelect);
            }
            Command::Back => self.terminate(),
            Command::PointerPress { x, y } => {
                if let Some(row) = menu::menu_row_at(x, y) {
                    self.menu_cursor.select(row);
                    session.play(audio, Sound::MenuSelect);
                    self.activate_main(MainItem::from_index(row), session, audio);
                }
            }
            Command::PointerMove { x, y } => {
                if let Some(row) = menu::menu_row_at(x, y) {
                    if self.menu_cursor.select(row) {
                        session.play(audio, Sound::MenuSelect);
                    }
                }
            }
            Command::PointerRelease => self.dragging_slider = false,
            _ => {}
        }
    }

    fn activate_main(&mut self, item: MainItem, session: &mut Session, audio: &mut dyn AudioService) {
        match item {
            MainItem::Start => self.start_round(session, audio),
            MainItem::Settings => self.set_mode(GameMode::Settings),
            MainItem::Quit => self.terminate(),
        }
    }

    fn handle_settings(
        &mut self,
        command: Command,
        session: &mut Session,
        audio: &mut dyn AudioService,
    ) {
        match command {
            Command::Confirm => {
                session.play(audio, Sound::MenuConfirm);
                self.activate_settings(SettingsItem::from_index(self.settings_cursor.selected()));
            }
            Command::Up => {
                self.settings_cursor.up();
                session.play(audio, Sound::MenuSelect);
            }
            Command::Down => {
                self.settings_cursor.down();
                session.play(audio, Sound::MenuSelect);
            }
            Command::Left | Command::Right => {
                if SettingsItem::from_index(self.settings_cursor.selected()) == SettingsItem::Volume {
                    let steps = if command == Command::Left { -1 } else { 1 };
                    session.step_sound_volume(audio, steps);
                    session.play(audio, Sound::MenuSelect);
                }
            }
            Command::Back => self.set_mode(GameMode::Menu),
            Command::ToggleSound => {
                session.toggle_sound();
                tracing::info!(enabled = session.audio.sound_enabled, "sound toggled");
            }
            Command::ToggleMusic => {
                session.toggle_music(audio);
                tracing::info!(enabled = session.audio.music_enabled, "music toggled");
            }
            Command::PointerPress { x, y } => {
                if menu::back_button_at(x, y) {
                    session.play(audio, Sound::MenuSelect);
                    self.set_mode(GameMode::Menu);
                } else if let Some(row) = menu::menu_row_at(x, y) {
                    self.settings_cursor.select(row);
                    session.play(audio, Sound::MenuSelect);
                    self.activate_settings(SettingsItem::from_index(row));
                }

                if self.mode == GameMode::Settings && menu::slider_grab_at(x, y) {
                    self.dragging_slider = true;
                    session.set_sound_volume(audio, menu::slider_volume(x));
                }
            }
            Command::PointerMove { x, y } => {
                if self.dragging_slider {
                    session.set_sound_volume(audio, menu::slider_volume(x));
                } else if let Some(row) = menu::menu_row_at(x, y) {
                    if self.settings_cursor.select(row) {
                        session.play(audio, Sound::MenuSelect);
                    }
                }
            }
            Command::PointerRelease => self.dragging_slider = false,
            _ => {}
        }
    }

    fn activate_settings(&mut self, item: SettingsItem) {
        match item {
            SettingsItem::Difficulty => self.set_mode(GameMode::DifficultySelect),
            SettingsItem::Volume => {}
            SettingsItem::Back => self.set_mode(GameMode::Menu),
        }
    }

    fn handle_difficulty(
        &mut self,
        command: Command,
        session: &mut Session,
        audio: &mut dyn AudioService,
    ) {
        match command {
            Command::Confirm => {
                session.play(audio, Sound::MenuConfirm);
                self.choose_difficulty(self.difficulty_cursor.selected(), session, audio);
            }
            Command::Up => {
                self.difficulty_cursor.up();
                session.play(audio, Sound::MenuSelect);
            }
            Command::Down => {
                self.difficulty_cursor.down();
                session.play(audio, Sound::MenuSelect);
            }
            Command::Back => self.set_mode(GameMode::Settings),
            Command::PointerPress { x, y } => {
                if menu::back_button_at(x, y) {
                    session.play(audio, Sound::MenuSelect);
                    self.set_mode(GameMode::Settings);
                } else if let Some(row) = menu::difficulty_row_at(x, y) {
                    self.difficulty_cursor.select(row);
                    session.play(audio, Sound::MenuSelect);
                    self.choose_difficulty(row, session, audio);
                }
            }
            Command::PointerMove { x, y } => {
                if let Some(row) = menu::difficulty_row_at(x, y) {
                    if self.difficulty_cursor.select(row) {
                        session.play(audio, Sound::MenuSelect);
                    }
                }
            }
            Command::PointerRelease => self.dragging_slider = false,
            _ => {}
        }
    }

    fn choose_difficulty(&mut self, index: usize, session: &mut Session, audio: &mut dyn AudioService) {
        let difficulty = Difficulty::from_index(index);
        tracing::info!(difficulty = difficulty.name(), "difficulty selected");
        session.difficulty = difficulty;
        self.start_round(session, audio);
    }

    fn handle_playing(
        &mut self,
        command: Command,
        session: &mut Session,
        audio: &mut dyn AudioService,
    ) {
        match command {
            Command::Back => {
                self.paused = !self.paused;
                tracing::debug!(paused = self.paused, "pause toggled");
            }
            Command::Action | Command::PointerPress { .. } => self.flap(session, audio),
            Command::QuitToMenu if self.paused => self.return_to_menu(audio),
            _ => {}
        }
    }

    fn handle_game_over(
        &mut self,
        command: Command,
        session: &mut Session,
        audio: &mut dyn AudioService,
    ) {
        match command {
            Command::Action | Command::PointerPress { .. } => self.start_round(session, audio),
            Command::Back => self.return_to_menu(audio),
            _ => {}
        }
    }
}
