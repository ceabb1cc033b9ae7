//! Device-agnostic commands and their crossterm bindings.
//!
//! The state machine only ever sees [`Command`]s. Mapping from terminal
//! events lives here so tests can drive the game without a terminal.

use crate::ui::Viewport;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// One discrete input, in world coordinates for pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Terminate from anywhere.
    Quit,
    /// Enter: activate the highlighted row.
    Confirm,
    /// Space: start, flap or retry depending on the screen.
    Action,
    /// Esc.
    Back,
    Up,
    Down,
    Left,
    Right,
    /// `q` while paused.
    QuitToMenu,
    ToggleSound,
    ToggleMusic,
    PointerPress { x: f64, y: f64 },
    PointerRelease,
    PointerMove { x: f64, y: f64 },
}

/// Map a key press. Repeats and releases are ignored.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let command = match key.code {
        KeyCode::Enter => Command::Confirm,
        KeyCode::Char(' ') => Command::Action,
        KeyCode::Esc => Command::Back,
        KeyCode::Up => Command::Up,
        KeyCode::Down => Command::Down,
        KeyCode::Left => Command::Left,
        KeyCode::Right => Command::Right,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::QuitToMenu,
        KeyCode::Char('s') | KeyCode::Char('S') => Command::ToggleSound,
        KeyCode::Char('m') | KeyCode::Char('M') => Command::ToggleMusic,
        _ => return None,
    };
    Some(command)
}

/// Map a mouse event, converting the terminal cell to world coordinates.
pub fn map_mouse(mouse: MouseEvent, viewport: &Viewport) -> Option<Command> {
    let (x, y) = viewport.to_world(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Command::PointerPress { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(Command::PointerRelease),
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            Some(Command::PointerMove { x, y })
        }
        _ => None,
    }
}

/// Map any terminal event.
pub fn map_event(event: Event, viewport: &Viewport) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse, viewport),
        _ => None,
    }
}
