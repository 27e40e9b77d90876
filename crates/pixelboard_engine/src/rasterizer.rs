//! Glyph and image compositing onto a [`PixelBuffer`].
//!
//! All drawing here clips: pixels that fall outside the buffer are skipped.

use crate::{Bitmap, Glyph, GlyphLookup, PixelBuffer, GLYPH_WIDTH};

/// Horizontal advance of a glyph, in device pixels.
pub const ADVANCE_WIDTH: i32 = GLYPH_WIDTH as i32;

/// Gap between two successive glyphs.
pub const CHAR_SPACING: i32 = 1;

/// Draws the lit pixels of `glyph` with its top left corner at `(x, y)` and returns the advance width.
pub fn draw_glyph(buffer: &mut PixelBuffer, glyph: &Glyph, x: i32, y: i32) -> i32 {
    for (dx, dy) in glyph.lit_pixels() {
        buffer.set_clipped(x.saturating_add(dx as i32), y.saturating_add(dy as i32), true);
    }
    ADVANCE_WIDTH
}

/// Draws `text` left to right starting at `(x, y)` and returns the cursor position after the last glyph.
///
/// Text is upper-cased first. Characters `lookup` can't resolve are left blank but still advance.
pub fn draw_text<L: GlyphLookup + ?Sized>(buffer: &mut PixelBuffer, text: &str, x: i32, y: i32, lookup: &L) -> i32 {
    let mut cursor = x;
    for ch in text.to_uppercase().chars() {
        let advance = match lookup.glyph(ch) {
            Some(glyph) => draw_glyph(buffer, &glyph, cursor, y),
            None => ADVANCE_WIDTH,
        };
        cursor = cursor.saturating_add(advance + CHAR_SPACING);
    }
    cursor
}

/// Width `draw_text` advances for `text`.
pub fn text_width(text: &str) -> i32 {
    text.to_uppercase().chars().count() as i32 * (ADVANCE_WIDTH + CHAR_SPACING)
}

pub fn draw_image(buffer: &mut PixelBuffer, bitmap: &Bitmap, x: i32, y: i32) {
    for (dx, dy) in bitmap.lit_pixels() {
        buffer.set_clipped(x.saturating_add(dx as i32), y.saturating_add(dy as i32), true);
    }
}

/// Erases a region before it gets redrawn.
pub fn clear_area(buffer: &mut PixelBuffer, x: i32, y: i32, width: i32, height: i32) {
    buffer.fill_region(x, y, width, height, false);
}
