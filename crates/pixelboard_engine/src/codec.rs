//! Bitmap codecs between the editor buffer and the hardware formats.
//!
//! Two distinct encodings exist:
//! - [`pack`]/[`unpack`]: 1 bit per pixel binary with the quadrant fold. A wide source
//!   (e.g. 256x32) is split in the middle and the right half is stacked below the left
//!   half, giving a narrower, taller output (e.g. 128x64).
//! - [`pack_whole`]/[`unpack_whole`]: textual `bitlines`, one character per cell, no folding.
//!
//! Packed layout: row-major, `width / 8` bytes per row, LSB-first. Bit 0 of a byte is the
//! leftmost of the 8 pixels it covers. There is no header, dimensions are agreed out of band.

use crate::{formats::BitLines, EngineError, PixelBuffer, Result, Size};

/// Hardware output width of the standard display.
pub const OUTPUT_WIDTH: usize = 128;

/// Hardware output height of the standard display.
pub const OUTPUT_HEIGHT: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    size: Size,
    bytes: Vec<u8>,
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width % 8 != 0 || height % 2 != 0 || width.checked_mul(height).is_none() {
        return Err(EngineError::InvalidDimensions { width, height });
    }
    Ok(())
}

impl PackedBitmap {
    /// Wraps raw packed bytes of a `width`x`height` image.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` for dimensions that can't be packed and `DecodeError` if the byte
    /// count is not `width * height / 8`.
    pub fn from_bytes(bytes: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width * height / 8;
        if bytes.len() != expected {
            return Err(EngineError::decode(format!(
                "packed bitmap has {} bytes, expected {expected} for {width}x{height}",
                bytes.len()
            )));
        }
        Ok(Self {
            size: Size::new(width, height),
            bytes,
        })
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

    pub fn bytes_per_row(&self) -> usize {
        self.size.width / 8
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Reads a single output pixel, `false` outside the image.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.size.width || y >= self.size.height {
            return false;
        }
        let byte = self.bytes[y * self.bytes_per_row() + x / 8];
        byte & (1 << (x % 8)) != 0
    }
}

/// Packs `buffer` into a `width`x`height` hardware image using the quadrant fold.
///
/// Output row `r` in the top half reads source row `r`; in the bottom half it reads source
/// row `r - height / 2`, shifted right by `width` columns. Source reads outside the buffer
/// are off.
///
/// # Errors
///
/// Returns `InvalidDimensions` unless `width` is a positive multiple of 8 and `height` is positive and even.
pub fn pack(buffer: &PixelBuffer, width: usize, height: usize) -> Result<PackedBitmap> {
    check_dimensions(width, height)?;
    let half = height / 2;
    let bytes_per_row = width / 8;
    let mut bytes = Vec::with_capacity(bytes_per_row * height);

    for y_out in 0..height {
        let (x_shift, y_in) = if y_out < half { (0, y_out) } else { (width, y_out - half) };
        for byte_index in 0..bytes_per_row {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x_in = byte_index * 8 + bit + x_shift;
                if buffer.is_on(x_in as i32, y_in as i32) {
                    byte |= 1 << bit;
                }
            }
            bytes.push(byte);
        }
    }

    log::debug!("packed {} buffer into {width}x{height} ({} bytes)", buffer.size(), bytes.len());
    Ok(PackedBitmap {
        size: Size::new(width, height),
        bytes,
    })
}

/// Decodes the bits of `packed` into a buffer of the packed dimensions.
///
/// This does not undo the quadrant fold, the result is in hardware space.
pub fn unpack(packed: &PackedBitmap) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(packed.width(), packed.height());
    for y in 0..packed.height() {
        for x in 0..packed.width() {
            if packed.get(x, y) {
                buffer.set_clipped(x as i32, y as i32, true);
            }
        }
    }
    buffer
}

/// Serializes `buffer` unfolded, one `'0'`/`'1'` per cell.
pub fn pack_whole(buffer: &PixelBuffer) -> BitLines {
    let lines = buffer.rows().map(|row| row.iter().map(|&on| if on { '1' } else { '0' }).collect()).collect();
    BitLines::new(lines)
}

/// Inverse of [`pack_whole`].
///
/// # Errors
///
/// Returns `DecodeError` if `bitlines` isn't a rectangular `'0'`/`'1'` grid.
pub fn unpack_whole(bitlines: &BitLines) -> Result<PixelBuffer> {
    let size = bitlines.validate()?;
    let mut buffer = PixelBuffer::new(size.width, size.height);
    for (y, line) in bitlines.bitlines.iter().enumerate() {
        for (x, bit) in line.bytes().enumerate() {
            if bit == b'1' {
                buffer.set_clipped(x as i32, y as i32, true);
            }
        }
    }
    Ok(buffer)
}

/// Loads a bitlines document into `target`.
///
/// # Errors
///
/// Returns `DecodeError` for malformed input and `SizeMismatch` if the document size differs from
/// `target`. `target` is left unmodified on any error.
pub fn import_bitlines(target: &mut PixelBuffer, bitlines: &BitLines) -> Result<()> {
    let decoded = unpack_whole(bitlines)?;
    if decoded.size() != target.size() {
        return Err(EngineError::size_mismatch(target.size(), decoded.size()));
    }
    *target = decoded;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_row() {
        let packed = pack(&PixelBuffer::new(256, 32), OUTPUT_WIDTH, OUTPUT_HEIGHT).unwrap();
        assert_eq!(packed.bytes_per_row(), 16);
        assert_eq!(packed.bytes().len(), 1024);
    }

    #[test]
    fn test_invalid_dimensions() {
        let buffer = PixelBuffer::new(16, 2);
        assert!(matches!(pack(&buffer, 12, 2), Err(EngineError::InvalidDimensions { width: 12, height: 2 })));
        assert!(matches!(pack(&buffer, 8, 3), Err(EngineError::InvalidDimensions { .. })));
        assert!(matches!(pack(&buffer, 0, 2), Err(EngineError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_get() {
        let packed = PackedBitmap::from_bytes(vec![0x80, 0x01], 8, 2).unwrap();
        assert!(packed.get(7, 0));
        assert!(packed.get(0, 1));
        assert!(!packed.get(0, 0));
        assert!(!packed.get(8, 0));
    }
}
