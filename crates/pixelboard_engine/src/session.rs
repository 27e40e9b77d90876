//! Pointer driven pixel editing.
//!
//! A stroke starts with a press. The cell under the press decides the mode for the whole
//! stroke: pressing a lit cell erases, pressing an unlit one draws. Moves while pressed are
//! joined to the previous cell with a line so fast pointer motion leaves no gaps.

use crate::{brushes, PixelBuffer, Position, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Draw,
    Erase,
}

impl DrawMode {
    pub fn value(self) -> bool {
        matches!(self, DrawMode::Draw)
    }
}

/// Pointer state in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub pressed: bool,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32, pressed: bool) -> Self {
        Self { x, y, pressed }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Debug, Default)]
pub struct DrawingSession {
    mode: DrawMode,
    last: Option<Position>,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    /// Feeds one pointer event into the session. Returns whether the buffer changed.
    pub fn handle(&mut self, buffer: &mut PixelBuffer, event: PointerEvent) -> bool {
        if !event.pressed {
            self.release();
            return false;
        }
        let pos = event.position();
        match self.last {
            None => {
                let Ok(lit) = buffer.get(pos.x, pos.y) else {
                    return false;
                };
                self.mode = if lit { DrawMode::Erase } else { DrawMode::Draw };
                buffer.set_clipped(pos.x, pos.y, self.mode.value());
                self.last = Some(pos);
                true
            }
            Some(last) => {
                let written = brushes::draw_line(buffer, last, pos, self.mode.value());
                self.last = Some(pos);
                written > 0
            }
        }
    }

    /// Ends the current stroke.
    pub fn release(&mut self) {
        self.last = None;
    }

    /// The pointer left the surface; same as a release.
    pub fn leave(&mut self) {
        self.release();
    }
}

/// Maps canvas pixels to cells for a display drawn as `led_size` dots separated by `padding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub led_size: u32,
    pub padding: u32,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self { led_size: 4, padding: 1 }
    }
}

impl CellGeometry {
    pub fn new(led_size: u32, padding: u32) -> Self {
        Self { led_size, padding }
    }

    pub fn cell_size(&self) -> u32 {
        (self.led_size + self.padding).max(1)
    }

    pub fn canvas_size(&self, size: Size) -> (u32, u32) {
        (size.width as u32 * self.cell_size(), size.height as u32 * self.cell_size())
    }

    /// Returns the cell under canvas point `(px, py)`, or `None` outside a `size` grid.
    pub fn cell_at(&self, px: f32, py: f32, size: Size) -> Option<Position> {
        let cell = self.cell_size() as f32;
        let col = (px / cell).floor();
        let row = (py / cell).floor();
        if col < 0.0 || row < 0.0 || col >= size.width as f32 || row >= size.height as f32 {
            return None;
        }
        Some(Position::new(col as i32, row as i32))
    }
}
