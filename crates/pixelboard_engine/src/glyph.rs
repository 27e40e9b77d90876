//! Fixed-size 7x7 bitmap glyphs.
//!
//! Each row is stored as a single byte with MSB-first bit ordering:
//! bit 7 is the leftmost pixel, bit 1 the rightmost of the 7 columns.

use std::{collections::HashMap, fmt::Display};

/// Glyph width in device pixels.
pub const GLYPH_WIDTH: usize = 7;

/// Glyph height in device pixels.
pub const GLYPH_HEIGHT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// One byte per row, MSB = leftmost pixel
    pub data: [u8; GLYPH_HEIGHT],
}

impl Glyph {
    pub const fn empty(ch: char) -> Self {
        Self { ch, data: [0; GLYPH_HEIGHT] }
    }

    /// Builds a glyph from `'0'`/`'1'` row strings.
    ///
    /// Rows shorter than 7 are padded with off pixels, anything beyond 7x7 is ignored.
    pub fn from_bitlines<S: AsRef<str>>(ch: char, lines: &[S]) -> Self {
        let mut glyph = Self::empty(ch);
        for (y, line) in lines.iter().take(GLYPH_HEIGHT).enumerate() {
            for (x, bit) in line.as_ref().chars().take(GLYPH_WIDTH).enumerate() {
                if bit == '1' {
                    glyph.data[y] |= 0x80 >> x;
                }
            }
        }
        glyph
    }

    /// Returns `false` for coordinates outside the glyph.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return false;
        }
        (self.data[y] & (0x80 >> x)) != 0
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, value: bool) {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return;
        }
        let mask = 0x80 >> x;
        if value {
            self.data[y] |= mask;
        } else {
            self.data[y] &= !mask;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Iterates the `(x, y)` offsets of all lit pixels.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..GLYPH_HEIGHT).flat_map(move |y| (0..GLYPH_WIDTH).filter(move |&x| self.get_pixel(x, y)).map(move |x| (x, y)))
    }

    pub fn to_bitlines(&self) -> Vec<String> {
        (0..GLYPH_HEIGHT)
            .map(|y| (0..GLYPH_WIDTH).map(|x| if self.get_pixel(x, y) { '1' } else { '0' }).collect())
            .collect()
    }
}

impl Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        for y in 0..GLYPH_HEIGHT {
            s.push_str(&format!("{y:2}"));
            for x in 0..GLYPH_WIDTH {
                s.push(if self.get_pixel(x, y) { '#' } else { '-' });
            }
            s.push('\n');
        }
        write!(f, "{s}---")
    }
}

/// Resolves characters to glyphs.
///
/// Returning `None` means "no glyph for this character"; the rasterizer then
/// leaves a blank cell of default width.
pub trait GlyphLookup {
    fn glyph(&self, ch: char) -> Option<Glyph>;
}

impl GlyphLookup for HashMap<char, Glyph> {
    fn glyph(&self, ch: char) -> Option<Glyph> {
        self.get(&ch).copied()
    }
}

impl<T: GlyphLookup + ?Sized> GlyphLookup for &T {
    fn glyph(&self, ch: char) -> Option<Glyph> {
        (**self).glyph(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bitlines_msb_first() {
        let glyph = Glyph::from_bitlines('A', &["1000001", "0100000"]);
        assert_eq!(glyph.data[0], 0x82);
        assert_eq!(glyph.data[1], 0x40);
        assert_eq!(glyph.data[2], 0x00);
        assert!(glyph.get_pixel(6, 0));
        assert!(!glyph.get_pixel(5, 0));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let glyph = Glyph::from_bitlines('1', &["11", "1"]);
        assert_eq!(glyph.to_bitlines()[0], "1100000");
        assert_eq!(glyph.to_bitlines()[1], "1000000");
        assert_eq!(glyph.to_bitlines()[6], "0000000");
    }

    #[test]
    fn test_oversized_rows_are_cut() {
        let rows = vec!["111111111"; 9];
        let glyph = Glyph::from_bitlines('X', &rows);
        assert_eq!(glyph.lit_pixels().count(), GLYPH_WIDTH * GLYPH_HEIGHT);
    }

    #[test]
    fn test_set_pixel() {
        let mut glyph = Glyph::empty('.');
        glyph.set_pixel(3, 3, true);
        assert!(glyph.get_pixel(3, 3));
        glyph.set_pixel(3, 3, false);
        assert!(glyph.is_empty());
        glyph.set_pixel(7, 0, true);
        assert!(glyph.is_empty());
    }
}
