//! The editable display surface.
//!
//! A `PixelBuffer` is a fixed-size grid of on/off cells stored row-major:
//! cell `(x, y)` lives at `cells[y * width + x]`. The buffer is created once
//! and never resized.
//!
//! Two access styles exist:
//! - `get`/`set` are strict and fail with [`EngineError::OutOfRange`].
//! - `is_on`/`set_clipped` are permissive and are what drawing code uses;
//!   writes outside the buffer are skipped.

use std::fmt::Display;

use crate::{EngineError, Result, Size};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size,
    cells: Vec<bool>,
}

/// Lit/unlit statistics of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferInfo {
    pub width: usize,
    pub height: usize,
    pub total: usize,
    pub leds_on: usize,
    pub leds_off: usize,
}

impl PixelBuffer {
    /// Creates an all-off buffer.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "pixel buffer needs non-zero dimensions");
        Self {
            size: Size::new(width, height),
            cells: vec![false; width * height],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.size.width || y as usize >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width + x as usize)
    }

    fn out_of_range(&self, x: i32, y: i32) -> EngineError {
        EngineError::OutOfRange {
            x,
            y,
            width: self.size.width,
            height: self.size.height,
        }
    }

    /// # Errors
    ///
    /// Returns `OutOfRange` if `(x, y)` lies outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Result<bool> {
        match self.index(x, y) {
            Some(idx) => Ok(self.cells[idx]),
            None => Err(self.out_of_range(x, y)),
        }
    }

    /// # Errors
    ///
    /// Returns `OutOfRange` if `(x, y)` lies outside the buffer. The buffer is not modified in that case.
    pub fn set(&mut self, x: i32, y: i32, value: bool) -> Result<()> {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                Ok(())
            }
            None => Err(self.out_of_range(x, y)),
        }
    }

    /// Reads a cell, treating everything outside the buffer as off.
    #[inline]
    pub fn is_on(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|idx| self.cells[idx])
    }

    /// Writes a cell if it lies inside the buffer. Returns whether anything was written.
    #[inline]
    pub fn set_clipped(&mut self, x: i32, y: i32, value: bool) -> bool {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = value;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn fill(&mut self, value: bool) {
        self.cells.fill(value);
    }

    /// Sets every cell of the `width`×`height` region at `(x0, y0)` to `value`.
    /// The region is clipped to the buffer.
    pub fn fill_region(&mut self, x0: i32, y0: i32, width: i32, height: i32, value: bool) {
        let x_start = x0.max(0);
        let y_start = y0.max(0);
        let x_end = x0.saturating_add(width.max(0)).min(self.size.width as i32);
        let y_end = y0.saturating_add(height.max(0)).min(self.size.height as i32);
        if x_start >= x_end || y_start >= y_end {
            return;
        }

        for y in y_start..y_end {
            let row = y as usize * self.size.width;
            self.cells[row + x_start as usize..row + x_end as usize].fill(value);
        }
    }

    /// Replaces all cells with `cells` (row-major).
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `cells` doesn't cover exactly this buffer; the buffer stays unchanged.
    pub fn replace_cells(&mut self, cells: &[bool]) -> Result<()> {
        if cells.len() != self.cells.len() {
            let actual_height = cells.len() / self.size.width;
            return Err(EngineError::size_mismatch(self.size, (self.size.width, actual_height)));
        }
        self.cells.copy_from_slice(cells);
        Ok(())
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.size.width)
    }

    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn info(&self) -> BufferInfo {
        let total = self.cells.len();
        let leds_on = self.count_on();
        BufferInfo {
            width: self.size.width,
            height: self.size.height,
            total,
            leds_on,
            leds_off: total - leds_on,
        }
    }
}

impl Display for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
