//! Menu cursors, item tables and pointer hit regions.
//!
//! All regions are in world coordinates (800x600) so the state machine can
//! test pointer positions without knowing anything about the terminal.

use crate::constants::{
    DIFFICULTY_ROW_HALF_WIDTH, DIFFICULTY_ROW_SPACING, MENU_ITEMS, MENU_ROW_HALF_WIDTH,
    MENU_ROW_SPACING, MENU_ROW_TOP, SCREEN_WIDTH, SLIDER_GRAB_MARGIN, SLIDER_HEIGHT, SLIDER_WIDTH,
    SLIDER_X,
};
use crate::geometry::Rect;

/// Main menu entries, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainItem {
    Start,
    Settings,
    Quit,
}

impl MainItem {
    pub const ALL: [MainItem; MENU_ITEMS] = [Self::Start, Self::Settings, Self::Quit];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % MENU_ITEMS]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "Start Game",
            Self::Settings => "Settings",
            Self::Quit => "Quit",
        }
    }
}

/// Settings entries, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Difficulty,
    Volume,
    Back,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; MENU_ITEMS] = [Self::Difficulty, Self::Volume, Self::Back];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % MENU_ITEMS]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Difficulty => "Difficulty",
            Self::Volume => "Sound Volume",
            Self::Back => "Back",
        }
    }
}

/// Wrapping selection over a fixed number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuCursor {
    selected: usize,
}

impl MenuCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn up(&mut self) {
        self.selected = (self.selected + MENU_ITEMS - 1) % MENU_ITEMS;
    }

    pub fn down(&mut self) {
        self.selected = (self.selected + 1) % MENU_ITEMS;
    }

    /// Move to `index`. Returns true if the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        let index = index % MENU_ITEMS;
        let changed = self.selected != index;
        self.selected = index;
        changed
    }
}

/// Top of the `index`th row on the main and settings menus.
pub fn menu_row_y(index: usize) -> f64 {
    MENU_ROW_TOP + index as f64 * MENU_ROW_SPACING
}

/// Top of the `index`th row on the difficulty screen.
pub fn difficulty_row_y(index: usize) -> f64 {
    MENU_ROW_TOP + index as f64 * DIFFICULTY_ROW_SPACING
}

pub fn menu_row_rect(index: usize) -> Rect {
    let y = menu_row_y(index);
    Rect::new(
        SCREEN_WIDTH / 2.0 - MENU_ROW_HALF_WIDTH,
        y - 10.0,
        MENU_ROW_HALF_WIDTH * 2.0,
        50.0,
    )
}

pub fn difficulty_row_rect(index: usize) -> Rect {
    let y = difficulty_row_y(index);
    Rect::new(
        SCREEN_WIDTH / 2.0 - DIFFICULTY_ROW_HALF_WIDTH,
        y - 15.0,
        DIFFICULTY_ROW_HALF_WIDTH * 2.0,
        70.0,
    )
}

pub fn back_button_rect() -> Rect {
    Rect::new(20.0, 20.0, 80.0, 35.0)
}

/// Row under the pointer on the main or settings menu.
pub fn menu_row_at(x: f64, y: f64) -> Option<usize> {
    (0..MENU_ITEMS).find(|&i| menu_row_rect(i).contains(x, y))
}

/// Row under the pointer on the difficulty screen.
pub fn difficulty_row_at(x: f64, y: f64) -> Option<usize> {
    (0..MENU_ITEMS).find(|&i| difficulty_row_rect(i).contains(x, y))
}

pub fn back_button_at(x: f64, y: f64) -> bool {
    back_button_rect().contains(x, y)
}

/// The volume slider track, drawn on the settings volume row.
pub fn slider_track() -> Rect {
    let row = SettingsItem::Volume as usize;
    Rect::new(
        SLIDER_X,
        menu_row_y(row) - SLIDER_HEIGHT / 2.0,
        SLIDER_WIDTH,
        SLIDER_HEIGHT,
    )
}

/// Whether a press at (x, y) grabs the slider. The grab area extends a
/// little past the track on every side.
pub fn slider_grab_at(x: f64, y: f64) -> bool {
    let track = slider_track();
    Rect::new(
        track.x - SLIDER_GRAB_MARGIN,
        track.y - SLIDER_GRAB_MARGIN,
        track.width + SLIDER_GRAB_MARGIN * 2.0,
        track.height + SLIDER_GRAB_MARGIN * 2.0,
    )
    .contains(x, y)
}

/// Volume for a pointer at `x` along the track, clamped to [0, 1].
pub fn slider_volume(x: f64) -> f32 {
    (((x - SLIDER_X) / SLIDER_WIDTH) as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut cursor = MenuCursor::new();
        cursor.up();
        assert_eq!(cursor.selected(), 2);
        cursor.down();
        assert_eq!(cursor.selected(), 0);
        cursor.down();
        cursor.down();
        cursor.down();
        assert_eq!(cursor.selected(), 0);
    }

    #[test]
    fn test_select_reports_change() {
        let mut cursor = MenuCursor::new();
        assert!(!cursor.select(0));
        assert!(cursor.select(2));
        assert!(!cursor.select(2));
    }

    #[test]
    fn test_menu_rows() {
        assert_eq!(menu_row_at(400.0, 230.0), Some(0));
        assert_eq!(menu_row_at(200.0, 300.0), Some(1));
        assert_eq!(menu_row_at(600.0, 420.0), Some(2));
        assert_eq!(menu_row_at(199.0, 230.0), None);
        assert_eq!(menu_row_at(400.0, 205.0), None);
    }

    #[test]
    fn test_difficulty_rows() {
        assert_eq!(difficulty_row_at(150.0, 205.0), Some(0));
        assert_eq!(difficulty_row_at(650.0, 375.0), Some(1));
        assert_eq!(difficulty_row_at(400.0, 470.0), Some(2));
        assert_eq!(difficulty_row_at(100.0, 300.0), None);
    }

    #[test]
    fn test_back_button() {
        assert!(back_button_at(20.0, 20.0));
        assert!(back_button_at(100.0, 55.0));
        assert!(!back_button_at(101.0, 40.0));
    }

    #[test]
    fn test_slider_geometry() {
        let track = slider_track();
        assert_eq!((track.x, track.y), (480.0, 290.0));
        assert_eq!((track.right(), track.bottom()), (680.0, 310.0));
        assert!(slider_grab_at(472.0, 285.0));
        assert!(!slider_grab_at(465.0, 300.0));
    }

    #[test]
    fn test_slider_volume_clamps() {
        assert_eq!(slider_volume(480.0), 0.0);
        assert_eq!(slider_volume(580.0), 0.5);
        assert_eq!(slider_volume(900.0), 1.0);
        assert_eq!(slider_volume(0.0), 0.0);
    }

    #[test]
    fn test_item_tables() {
        assert_eq!(MainItem::from_index(1), MainItem::Settings);
        assert_eq!(SettingsItem::from_index(1), SettingsItem::Volume);
        assert_eq!(SettingsItem::Back.label(), "Back");
    }
}
