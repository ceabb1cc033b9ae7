//! Whole-frame runs through the orchestrator: commands in, one update,
//! draw calls out.

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use skybird::constants::{BIRD_SIZE, BIRD_START_Y, COUNTDOWN_TICKS, SCREEN_HEIGHT};
use skybird::difficulty::Difficulty;
use skybird::frame::Orchestrator;
use skybird::geometry::Rect;
use skybird::input::{self, Command};
use skybird::services::{
    Align, AudioService, Color, Fill, ImageId, LogAudio, NoAssets, Renderer, Sound, TextSize,
    VolumeKind,
};
use skybird::session::{AudioSettings, Session};
use skybird::state_machine::GameMode;
use skybird::ui::{self, Viewport};

// =============================================================================
// Fakes
// =============================================================================

#[derive(Default)]
struct TextRecorder {
    texts: Vec<String>,
    rects: usize,
}

impl TextRecorder {
    fn has(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

impl Renderer for TextRecorder {
    fn clear(&mut self, _color: Color) {
        self.texts.clear();
        self.rects = 0;
    }

    fn draw_rect(&mut self, _rect: Rect, _color: Color, _fill: Fill) {
        self.rects += 1;
    }

    fn draw_circle(&mut self, _center: (f64, f64), _radius: f64, _color: Color, _fill: Fill) {}

    fn draw_line(&mut self, _from: (f64, f64), _to: (f64, f64), _color: Color) {}

    fn draw_text(&mut self, text: &str, _pos: (f64, f64), _size: TextSize, _color: Color, _align: Align) {
        self.texts.push(text.to_string());
    }

    fn blit_image(&mut self, _image: &ImageId, _rect: Rect, _rotation: f64) {}
}

#[derive(Default)]
struct CountingAudio {
    sounds: Vec<Sound>,
}

impl AudioService for CountingAudio {
    fn play_sound(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }
    fn play_music(&mut self, _looped: bool) {}
    fn stop_music(&mut self) {}
    fn set_volume(&mut self, _kind: VolumeKind, _level: f32) {}
}

fn orchestrator(difficulty: Difficulty, audio: &mut dyn AudioService) -> Orchestrator {
    let session = Session::new(Some(2024), difficulty, AudioSettings::default());
    Orchestrator::new(session, audio)
}

fn idle(orch: &mut Orchestrator, audio: &mut dyn AudioService, frames: u32) {
    for _ in 0..frames {
        assert!(orch.frame(None::<Command>, audio));
    }
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_easy_round_without_input_ends_in_game_over() {
    let mut audio = CountingAudio::default();
    let mut orch = orchestrator(Difficulty::Easy, &mut audio);

    assert!(orch.frame([Command::Action], &mut audio));
    idle(&mut orch, &mut audio, COUNTDOWN_TICKS - 1);
    assert_eq!(orch.game.mode(), GameMode::Playing);

    let mut frames = 0;
    while orch.game.mode() == GameMode::Playing {
        assert!(orch.frame(None::<Command>, &mut audio));
        frames += 1;
        assert!(frames < 60, "bird never hit the ground");
    }

    assert_eq!(orch.game.mode(), GameMode::GameOver);
    let round = orch.game.round().expect("round kept for the game-over screen");
    assert!(round.bird.y + BIRD_SIZE >= SCREEN_HEIGHT);
    assert_eq!(round.score, 0);
    assert!(audio.sounds.contains(&Sound::Crash));

    let mut recorder = TextRecorder::default();
    orch.draw(&mut recorder, &NoAssets);
    assert!(recorder.has("Game Over"));
    assert!(recorder.has("Final score: 0"));
    assert!(!recorder.has("New record!"));
}

#[test]
fn test_medium_hover_spawns_one_pipe() {
    let mut audio = CountingAudio::default();
    let mut orch = orchestrator(Difficulty::Medium, &mut audio);

    orch.frame([Command::Action], &mut audio);
    idle(&mut orch, &mut audio, COUNTDOWN_TICKS - 1);

    for _ in 0..90 {
        let falling = orch.game.round().is_some_and(|r| r.bird.y > BIRD_START_Y);
        let commands = falling.then_some(Command::Action);
        assert!(orch.frame(commands, &mut audio));
        assert_eq!(orch.game.mode(), GameMode::Playing);
    }

    assert_eq!(orch.game.round().map(|r| r.obstacles.len()), Some(1));
}

#[test]
fn test_frame_counter_and_quit() {
    let mut audio = LogAudio::new();
    let mut orch = orchestrator(Difficulty::Medium, &mut audio);
    idle(&mut orch, &mut audio, 5);
    assert_eq!(orch.frames(), 5);

    assert!(!orch.frame([Command::Quit, Command::Action], &mut audio));
    assert_eq!(orch.game.mode(), GameMode::Menu);
    assert_eq!(orch.frames(), 5);
}

#[test]
fn test_pause_overlay_and_frozen_world() {
    let mut audio = LogAudio::new();
    let mut orch = orchestrator(Difficulty::Easy, &mut audio);
    orch.frame([Command::Action], &mut audio);
    idle(&mut orch, &mut audio, COUNTDOWN_TICKS + 5);

    orch.frame([Command::Back], &mut audio);
    let y = orch.game.round().map(|r| r.bird.y);
    idle(&mut orch, &mut audio, 30);
    assert_eq!(orch.game.round().map(|r| r.bird.y), y);

    let mut recorder = TextRecorder::default();
    orch.draw(&mut recorder, &NoAssets);
    assert!(recorder.has("Paused"));
    assert!(recorder.has("Score: 0"));
    assert!(recorder.rects > 0);

    orch.frame([Command::QuitToMenu], &mut audio);
    orch.draw(&mut recorder, &NoAssets);
    assert!(recorder.has("Start Game"));
}

// =============================================================================
// Terminal front end
// =============================================================================

#[test]
fn test_terminal_frame_shows_menu_title() {
    let mut audio = LogAudio::new();
    let orch = orchestrator(Difficulty::Hard, &mut audio);
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("test terminal");

    let mut viewport = None;
    terminal
        .draw(|frame| {
            viewport = Some(ui::draw_ui(frame, &orch, &NoAssets));
        })
        .expect("draw");

    let text = screen_text(&terminal);
    assert!(text.contains("Skybird"));
    assert!(text.contains("Hard"));

    let viewport = viewport.expect("viewport returned");
    assert_eq!(viewport.area().width, 98);
    assert_eq!(viewport.area().height, 38);
}

#[test]
fn test_mouse_click_through_viewport_starts_round() {
    use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    let mut audio = LogAudio::new();
    let mut orch = orchestrator(Difficulty::Medium, &mut audio);
    let viewport = Viewport::new(ratatui::layout::Rect::new(0, 0, 80, 30));

    // Column 40, row 11 lands inside the "Start Game" row
    let event = Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 40,
        row: 11,
        modifiers: KeyModifiers::NONE,
    });
    let command = input::map_event(event, &viewport).expect("press maps to a command");
    assert!(matches!(command, Command::PointerPress { .. }));

    orch.frame([command], &mut audio);
    assert_eq!(orch.game.mode(), GameMode::Playing);
}
