//! Draw pass: turns the current game state into renderer calls.
//!
//! Everything here is in world coordinates. Reads state only; a frame never
//! mutates the game.

use crate::constants::{
    BIRD_SIZE, PIPE_WIDTH, POWERUP_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, SLIDER_HEIGHT, SLIDER_WIDTH,
    SLIDER_X,
};
use crate::difficulty::Difficulty;
use crate::entities::{Bird, Obstacle, PowerUp};
use crate::geometry::Rect;
use crate::menu::{self, MainItem, SettingsItem};
use crate::round::Round;
use crate::services::{Align, AssetProvider, Color, Fill, Renderer, TextSize};
use crate::session::Session;
use crate::state_machine::{Game, GameMode};

const CENTER_X: f64 = SCREEN_WIDTH / 2.0;
const BIRD_BODY: Color = Color::rgb(255, 220, 0);
const BIRD_SHADOW: Color = Color::rgb(200, 200, 0);
const BIRD_WING: Color = Color::rgb(255, 150, 0);
const HIGHLIGHT: Color = Color::YELLOW.with_alpha(30);
const OVERLAY: Color = Color::BLACK.with_alpha(128);
const PANEL: Color = Color::WHITE.with_alpha(160);
const GROUND: Color = Color::rgb(222, 184, 135);
const GROUND_HEIGHT: f64 = 12.0;

/// Draw one frame for whatever screen is active.
pub fn draw(game: &Game, session: &Session, renderer: &mut dyn Renderer, assets: &dyn AssetProvider) {
    renderer.clear(Color::SKY_BLUE);

    match game.mode() {
        GameMode::Menu => draw_main_menu(game, renderer),
        GameMode::Settings => draw_settings(game, session, renderer),
        GameMode::DifficultySelect => draw_difficulty_select(game, session, renderer),
        GameMode::Playing => {
            if let Some(round) = game.round() {
                draw_world(round, renderer, assets);
                draw_hud(round, session, renderer);
                if game.is_paused() {
                    draw_pause_overlay(renderer);
                } else if round.in_countdown() {
                    draw_countdown_overlay(round, renderer);
                }
            }
        }
        GameMode::GameOver => {
            if let Some(round) = game.round() {
                draw_world(round, renderer, assets);
                draw_game_over(round, session, renderer);
            }
        }
    }
}

fn text(renderer: &mut dyn Renderer, s: &str, x: f64, y: f64, size: TextSize, color: Color) {
    renderer.draw_text(s, (x, y), size, color, Align::Center);
}

// =============================================================================
// Playfield
// =============================================================================

fn draw_world(round: &Round, renderer: &mut dyn Renderer, assets: &dyn AssetProvider) {
    renderer.draw_rect(
        Rect::new(0.0, SCREEN_HEIGHT - GROUND_HEIGHT, SCREEN_WIDTH, GROUND_HEIGHT),
        GROUND,
        Fill::Solid,
    );

    for obstacle in &round.obstacles {
        draw_obstacle(obstacle, renderer);
    }
    for powerup in &round.powerups {
        draw_powerup(powerup, renderer);
    }
    for particle in round.particles.iter() {
        renderer.draw_circle(
            (particle.x, particle.y),
            particle.radius(),
            particle.faded_color(),
            Fill::Solid,
        );
    }

    draw_bird(&round.bird, renderer, assets);

    if round.effects.shield_active() {
        renderer.draw_circle(
            round.bird.center(),
            BIRD_SIZE / 2.0 + 10.0,
            Color::BLUE,
            Fill::Outline(3),
        );
    }
}

fn draw_obstacle(obstacle: &Obstacle, renderer: &mut dyn Renderer) {
    let (top, bottom) = obstacle.rects();
    // Moving pipes get an orange rim so the player can tell them apart
    let rim = if obstacle.is_moving() { Color::ORANGE } else { Color::DARK_GREEN };

    for body in [top, bottom] {
        renderer.draw_rect(body, Color::PIPE_GREEN, Fill::Solid);
        renderer.draw_rect(body, rim, Fill::Outline(3));
    }
    renderer.draw_rect(
        Rect::new(obstacle.x - 5.0, top.bottom() - 20.0, PIPE_WIDTH + 10.0, 20.0),
        rim,
        Fill::Solid,
    );
    renderer.draw_rect(
        Rect::new(obstacle.x - 5.0, bottom.y, PIPE_WIDTH + 10.0, 20.0),
        rim,
        Fill::Solid,
    );
}

fn draw_powerup(powerup: &PowerUp, renderer: &mut dyn Renderer) {
    let color = powerup.kind.color();
    let glow = (60.0 + powerup.glow() * 120.0) as u8;
    renderer.draw_circle(
        (powerup.x, powerup.y),
        POWERUP_SIZE / 2.0 + 6.0,
        color.with_alpha(glow),
        Fill::Solid,
    );
    renderer.draw_circle((powerup.x, powerup.y), POWERUP_SIZE / 2.0, color, Fill::Solid);
    renderer.draw_circle((powerup.x, powerup.y), POWERUP_SIZE / 2.0, Color::WHITE, Fill::Outline(2));
}

fn draw_bird(bird: &Bird, renderer: &mut dyn Renderer, assets: &dyn AssetProvider) {
    let (cx, cy) = bird.center();

    if let Some(image) = assets.image("bird") {
        let rect = Rect::centered(cx, cy, BIRD_SIZE * 2.0, BIRD_SIZE * 2.0);
        renderer.blit_image(&image, rect, bird.rotation);
        return;
    }

    let half = BIRD_SIZE / 2.0;
    renderer.draw_circle((cx, cy), half + 2.0, BIRD_SHADOW, Fill::Solid);
    renderer.draw_circle((cx, cy), half, BIRD_BODY, Fill::Solid);

    let wing = (bird.wing_phase * 1.5).sin() * 8.0;
    renderer.draw_line((cx - 8.0, cy), (cx - 20.0, cy - 4.0 + wing), BIRD_WING);

    // Beak and eye follow the tilt
    let angle = (-bird.rotation).to_radians();
    let (sin, cos) = angle.sin_cos();
    let beak = (cx + cos * (half + 6.0), cy + sin * (half + 6.0));
    renderer.draw_line((cx + cos * half, cy + sin * half), beak, Color::ORANGE);
    let eye = (cx + cos * 6.0 + sin * 5.0, cy + sin * 6.0 - cos * 5.0);
    renderer.draw_circle(eye, 3.0, Color::BLACK, Fill::Solid);
}

fn draw_hud(round: &Round, session: &Session, renderer: &mut dyn Renderer) {
    let lines = [
        format!("Score: {}", round.score),
        format!("High score: {}", session.high_score),
        format!("Difficulty: {}", round.difficulty.name()),
    ];
    let mut y = 10.0;
    for line in &lines {
        renderer.draw_text(line, (10.0, y), TextSize::Normal, Color::BLACK, Align::Left);
        y += 35.0;
    }

    for (kind, timer) in round.effects.active() {
        let line = format!("{}: {}s", kind.name(), timer.seconds_left(session.tick_rate));
        renderer.draw_text(&line, (10.0, y), TextSize::Normal, kind.color(), Align::Left);
        y += 35.0;
    }
}

fn draw_pause_overlay(renderer: &mut dyn Renderer) {
    renderer.draw_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT), OVERLAY, Fill::Solid);
    let mid = SCREEN_HEIGHT / 2.0;
    text(renderer, "Paused", CENTER_X, mid - 50.0, TextSize::Large, Color::WHITE);
    text(renderer, "Esc to resume, Q for menu", CENTER_X, mid + 50.0, TextSize::Normal, Color::WHITE);
}

fn draw_countdown_overlay(round: &Round, renderer: &mut dyn Renderer) {
    renderer.draw_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT), OVERLAY, Fill::Solid);
    text(
        renderer,
        round.countdown.label(),
        CENTER_X,
        SCREEN_HEIGHT / 2.0,
        TextSize::Huge,
        Color::WHITE,
    );
}

fn draw_game_over(round: &Round, session: &Session, renderer: &mut dyn Renderer) {
    let mid = SCREEN_HEIGHT / 2.0;
    renderer.draw_rect(Rect::new(150.0, 100.0, 500.0, 340.0), PANEL, Fill::Solid);

    text(renderer, "Game Over", CENTER_X, 150.0, TextSize::Large, Color::RED);
    let score = format!("Final score: {}", round.score);
    text(renderer, &score, CENTER_X, mid - 30.0, TextSize::Normal, Color::BLACK);

    if round.score == session.high_score && session.high_score > 0 {
        text(renderer, "New record!", CENTER_X, mid + 10.0, TextSize::Normal, Color::YELLOW);
    }

    text(renderer, "Space to try again", CENTER_X, mid + 60.0, TextSize::Normal, Color::BLACK);
    text(renderer, "Esc for the main menu", CENTER_X, mid + 100.0, TextSize::Small, Color::GRAY);
}

// =============================================================================
// Menus
// =============================================================================

fn draw_row_highlight(renderer: &mut dyn Renderer, rect: Rect) {
    renderer.draw_rect(rect, HIGHLIGHT, Fill::Solid);
    renderer.draw_rect(rect, Color::YELLOW, Fill::Outline(2));
}

fn row_color(selected: bool) -> Color {
    if selected {
        Color::ORANGE
    } else {
        Color::BLACK
    }
}

fn draw_back_button(renderer: &mut dyn Renderer) {
    let rect = menu::back_button_rect();
    renderer.draw_rect(rect, Color::WHITE, Fill::Solid);
    renderer.draw_rect(rect, Color::BLACK, Fill::Outline(2));
    let (cx, cy) = rect.center();
    text(renderer, "< Back", cx, cy, TextSize::Small, Color::BLACK);
}

fn draw_hints(renderer: &mut dyn Renderer, first: &str, second: Option<&str>) {
    text(renderer, first, CENTER_X, SCREEN_HEIGHT - 80.0, TextSize::Small, Color::GRAY);
    if let Some(second) = second {
        text(renderer, second, CENTER_X, SCREEN_HEIGHT - 50.0, TextSize::Small, Color::GRAY);
    }
}

fn draw_main_menu(game: &Game, renderer: &mut dyn Renderer) {
    text(renderer, "Skybird", CENTER_X, 100.0, TextSize::Large, Color::BLACK);

    let selected = game.menu_cursor().selected();
    for (i, item) in MainItem::ALL.iter().enumerate() {
        let rect = menu::menu_row_rect(i);
        if i == selected {
            draw_row_highlight(renderer, rect);
        }
        let (cx, cy) = rect.center();
        text(renderer, item.label(), cx, cy, TextSize::Normal, row_color(i == selected));
    }

    draw_hints(
        renderer,
        "Up/Down to choose, Enter to confirm",
        Some("or press Space to start right away"),
    );
}

fn draw_settings(game: &Game, session: &Session, renderer: &mut dyn Renderer) {
    draw_back_button(renderer);
    text(renderer, "Settings", CENTER_X, 100.0, TextSize::Title, Color::BLACK);

    let selected = game.settings_cursor().selected();
    for (i, item) in SettingsItem::ALL.iter().enumerate() {
        let rect = menu::menu_row_rect(i);
        if i == selected {
            draw_row_highlight(renderer, rect);
        }
        let (_, cy) = rect.center();
        let color = row_color(i == selected);

        match item {
            SettingsItem::Difficulty => {
                let label = format!("{}: {}", item.label(), session.difficulty.name());
                text(renderer, &label, CENTER_X, cy, TextSize::Normal, color);
            }
            SettingsItem::Volume => {
                renderer.draw_text(
                    item.label(),
                    (rect.x + 20.0, cy - 10.0),
                    TextSize::Normal,
                    color,
                    Align::Left,
                );
                draw_volume_slider(session.audio.sound_volume, renderer);
            }
            SettingsItem::Back => text(renderer, item.label(), CENTER_X, cy, TextSize::Normal, color),
        }
    }

    let toggles = format!(
        "Sound: {} (S)    Music: {} (M)",
        on_off(session.audio.sound_enabled),
        on_off(session.audio.music_enabled)
    );
    text(renderer, &toggles, CENTER_X, 480.0, TextSize::Small, Color::BLACK);

    draw_hints(
        renderer,
        "Up/Down to choose, Enter to confirm, Esc to go back",
        Some("Volume: Left/Right or drag the slider"),
    );
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn draw_volume_slider(volume: f32, renderer: &mut dyn Renderer) {
    let track = menu::slider_track();
    renderer.draw_rect(track, Color::GRAY, Fill::Solid);
    renderer.draw_rect(track, Color::BLACK, Fill::Outline(2));

    let knob_x = SLIDER_X + f64::from(volume) * SLIDER_WIDTH;
    renderer.draw_rect(
        Rect::new(knob_x - 5.0, track.y - 2.0, 10.0, SLIDER_HEIGHT + 4.0),
        Color::YELLOW,
        Fill::Solid,
    );

    let percent = format!("{}%", (volume * 100.0).round() as u32);
    let (_, cy) = track.center();
    text(renderer, &percent, track.right() + 30.0, cy, TextSize::Small, Color::BLACK);
}

fn draw_difficulty_select(game: &Game, session: &Session, renderer: &mut dyn Renderer) {
    draw_back_button(renderer);
    text(renderer, "Choose Difficulty", CENTER_X, 100.0, TextSize::Title, Color::BLACK);

    let selected = game.difficulty_cursor().selected();
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let rect = menu::difficulty_row_rect(i);
        if i == selected {
            draw_row_highlight(renderer, rect);
        }
        let y = menu::difficulty_row_y(i);
        let color = row_color(i == selected);
        text(renderer, difficulty.name(), CENTER_X, y, TextSize::Normal, color);
        text(renderer, difficulty.description(), CENTER_X, y + 25.0, TextSize::Small, Color::GRAY);
        if *difficulty == session.difficulty {
            text(renderer, "(current)", CENTER_X + 100.0, y, TextSize::Small, Color::DARK_GREEN);
        }
    }

    draw_hints(renderer, "Up/Down to choose, Enter to start, Esc to go back", None);
}
