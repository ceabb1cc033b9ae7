//! A [`Renderer`] that paints into a ratatui [`Buffer`].
//!
//! The 800x600 world is scaled onto the terminal area, one world rectangle
//! per cell. Shapes colour cell backgrounds; text sets foreground glyphs.
//! Colours with alpha below 255 are blended over whatever is already there.

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::geometry::Rect as WorldRect;
use crate::services::{Align, Color, Fill, ImageId, Renderer, TextSize};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color as TermColor, Modifier};

/// Mapping between terminal cells and world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    fn cell_width(&self) -> f64 {
        SCREEN_WIDTH / f64::from(self.area.width.max(1))
    }

    fn cell_height(&self) -> f64 {
        SCREEN_HEIGHT / f64::from(self.area.height.max(1))
    }

    /// World position of the centre of a terminal cell.
    pub fn to_world(&self, column: u16, row: u16) -> (f64, f64) {
        let col = f64::from(column.saturating_sub(self.area.x)) + 0.5;
        let row = f64::from(row.saturating_sub(self.area.y)) + 0.5;
        (col * self.cell_width(), row * self.cell_height())
    }

    /// Cell column and row (relative to the area) covering a world point.
    /// May lie outside the area.
    fn to_cell(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (x / self.cell_width()).floor() as i32,
            (y / self.cell_height()).floor() as i32,
        )
    }

    fn contains_cell(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < i32::from(self.area.width) && row < i32::from(self.area.height)
    }
}

pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    viewport: Viewport,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self {
            buf,
            viewport: Viewport::new(area),
        }
    }

    fn to_term(color: Color) -> TermColor {
        TermColor::Rgb(color.r, color.g, color.b)
    }

    fn blend(under: TermColor, over: Color) -> TermColor {
        if over.a == 255 {
            return Self::to_term(over);
        }
        let (r, g, b) = match under {
            TermColor::Rgb(r, g, b) => (r, g, b),
            _ => (0, 0, 0),
        };
        let a = f64::from(over.a) / 255.0;
        let mix = |base: u8, top: u8| (f64::from(base) * (1.0 - a) + f64::from(top) * a).round() as u8;
        TermColor::Rgb(mix(r, over.r), mix(g, over.g), mix(b, over.b))
    }

    /// Paint the background of one area-relative cell, clipped to the area.
    fn paint(&mut self, col: i32, row: i32, color: Color) {
        if !self.viewport.contains_cell(col, row) {
            return;
        }
        let area = self.viewport.area;
        let x = area.x + col as u16;
        let y = area.y + row as u16;
        let cell = self.buf.get_mut(x, y);
        let bg = Self::blend(cell.bg, color);
        cell.set_bg(bg);
    }

    fn put_char(&mut self, col: i32, row: i32, ch: char, color: Color, bold: bool) {
        if !self.viewport.contains_cell(col, row) {
            return;
        }
        let area = self.viewport.area;
        let cell = self.buf.get_mut(area.x + col as u16, area.y + row as u16);
        cell.set_char(ch).set_fg(Self::to_term(color));
        if bold {
            cell.modifier.insert(Modifier::BOLD);
        }
    }

    /// Cells whose centres fall inside a world rectangle.
    fn cells_in(&self, rect: WorldRect) -> impl Iterator<Item = (i32, i32)> {
        let (c0, r0) = self.viewport.to_cell(rect.x, rect.y);
        let (c1, r1) = self.viewport.to_cell(rect.right(), rect.bottom());
        let cw = self.viewport.cell_width();
        let ch = self.viewport.cell_height();
        (r0..=r1).flat_map(move |row| {
            (c0..=c1).filter_map(move |col| {
                let cx = (f64::from(col) + 0.5) * cw;
                let cy = (f64::from(row) + 0.5) * ch;
                rect.contains(cx, cy).then_some((col, row))
            })
        })
    }
}

impl Renderer for BufferCanvas<'_> {
    fn clear(&mut self, color: Color) {
        let area = self.viewport.area;
        let bg = Self::to_term(color);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                self.buf.get_mut(x, y).reset();
                self.buf.get_mut(x, y).set_bg(bg);
            }
        }
    }

    fn draw_rect(&mut self, rect: WorldRect, color: Color, fill: Fill) {
        match fill {
            Fill::Solid => {
                let cells: Vec<_> = self.cells_in(rect).collect();
                for (col, row) in cells {
                    self.paint(col, row, color);
                }
            }
            Fill::Outline(width) => {
                let w = f64::from(width).max(self.viewport.cell_width());
                let h = f64::from(width).max(self.viewport.cell_height());
                let edges = [
                    WorldRect::new(rect.x, rect.y, rect.width, h),
                    WorldRect::new(rect.x, rect.bottom() - h, rect.width, h),
                    WorldRect::new(rect.x, rect.y + h, w, rect.height - 2.0 * h),
                    WorldRect::new(rect.right() - w, rect.y + h, w, rect.height - 2.0 * h),
                ];
                for edge in edges {
                    self.draw_rect(edge, color, Fill::Solid);
                }
            }
        }
    }

    fn draw_circle(&mut self, center: (f64, f64), radius: f64, color: Color, fill: Fill) {
        if radius <= 0.0 {
            return;
        }
        let (cx, cy) = center;
        let bounds = WorldRect::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
        let cw = self.viewport.cell_width();
        let ch = self.viewport.cell_height();
        let inner = match fill {
            Fill::Solid => None,
            Fill::Outline(width) => Some((radius - f64::from(width).max(cw.max(ch))).max(0.0)),
        };

        let cells: Vec<_> = self.cells_in(bounds).collect();
        let mut painted = false;
        for (col, row) in cells {
            let px = (f64::from(col) + 0.5) * cw;
            let py = (f64::from(row) + 0.5) * ch;
            let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            if d <= radius && inner.map_or(true, |r| d >= r) {
                self.paint(col, row, color);
                painted = true;
            }
        }

        // Anything smaller than a cell still shows up as one
        if !painted {
            let (col, row) = self.viewport.to_cell(cx, cy);
            self.paint(col, row, color);
        }
    }

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        let (c0, r0) = self.viewport.to_cell(from.0, from.1);
        let (c1, r1) = self.viewport.to_cell(to.0, to.1);
        let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1);
        let mut last = None;
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            let col = (f64::from(c0) + f64::from(c1 - c0) * t).round() as i32;
            let row = (f64::from(r0) + f64::from(r1 - r0) * t).round() as i32;
            if last != Some((col, row)) {
                self.paint(col, row, color);
                last = Some((col, row));
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: (f64, f64), size: TextSize, color: Color, align: Align) {
        let (col, row) = self.viewport.to_cell(pos.0, pos.1);
        let len = text.chars().count() as i32;
        let start = match align {
            Align::Left => col,
            Align::Center => col - len / 2,
        };
        let bold = !matches!(size, TextSize::Small | TextSize::Normal);
        for (i, ch) in text.chars().enumerate() {
            self.put_char(start + i as i32, row, ch, color, bold);
        }
    }

    fn blit_image(&mut self, image: &ImageId, rect: WorldRect, _rotation: f64) {
        // Terminals cannot show bitmaps; mark the image's footprint instead
        tracing::trace!(image = %image.0, "image drawn as placeholder");
        let cells: Vec<_> = self.cells_in(rect).collect();
        for (col, row) in cells {
            self.put_char(col, row, '#', Color::WHITE, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_area() -> Rect {
        Rect::new(0, 0, 80, 30)
    }

    #[test]
    fn test_world_cell_round_trip() {
        let viewport = Viewport::new(canvas_area());
        let (x, y) = viewport.to_world(0, 0);
        assert_eq!((x, y), (5.0, 10.0));
        assert_eq!(viewport.to_cell(x, y), (0, 0));
        assert_eq!(viewport.to_cell(799.0, 599.0), (79, 29));
    }

    #[test]
    fn test_offset_area() {
        let viewport = Viewport::new(Rect::new(10, 5, 80, 30));
        assert_eq!(viewport.to_world(10, 5), (5.0, 10.0));
    }

    #[test]
    fn test_clear_and_solid_rect() {
        let area = canvas_area();
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas::new(&mut buf, area);
        canvas.clear(Color::SKY_BLUE);
        canvas.draw_rect(WorldRect::new(0.0, 0.0, 100.0, 100.0), Color::RED, Fill::Solid);

        assert_eq!(buf.get(0, 0).bg, TermColor::Rgb(255, 0, 0));
        assert_eq!(buf.get(9, 4).bg, TermColor::Rgb(255, 0, 0));
        assert_eq!(buf.get(10, 0).bg, TermColor::Rgb(135, 206, 235));
    }

    #[test]
    fn test_translucent_overlay_blends() {
        let area = canvas_area();
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas::new(&mut buf, area);
        canvas.clear(Color::WHITE);
        canvas.draw_rect(
            WorldRect::new(0.0, 0.0, 800.0, 600.0),
            Color::BLACK.with_alpha(128),
            Fill::Solid,
        );
        assert_eq!(buf.get(40, 15).bg, TermColor::Rgb(127, 127, 127));
    }

    #[test]
    fn test_centered_text() {
        let area = canvas_area();
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas::new(&mut buf, area);
        canvas.draw_text("Go!", (400.0, 300.0), TextSize::Huge, Color::WHITE, Align::Center);
        assert_eq!(buf.get(39, 15).symbol(), "G");
        assert_eq!(buf.get(40, 15).symbol(), "o");
        assert_eq!(buf.get(41, 15).symbol(), "!");
        assert!(buf.get(39, 15).modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_shapes_clip_to_area() {
        let area = canvas_area();
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas::new(&mut buf, area);
        canvas.draw_rect(WorldRect::new(-200.0, -200.0, 1400.0, 1200.0), Color::RED, Fill::Solid);
        canvas.draw_circle((-50.0, 700.0), 200.0, Color::BLUE, Fill::Solid);
        canvas.draw_line((-100.0, -100.0), (900.0, 700.0), Color::GREEN);
        assert_eq!(buf.get(79, 0).bg, TermColor::Rgb(255, 0, 0));
    }

    #[test]
    fn test_tiny_circle_still_visible() {
        let area = canvas_area();
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas::new(&mut buf, area);
        canvas.draw_circle((401.0, 301.0), 2.0, Color::RED, Fill::Solid);
        assert_eq!(buf.get(40, 15).bg, TermColor::Rgb(255, 0, 0));
    }
}
