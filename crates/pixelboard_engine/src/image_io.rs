//! Conversions between raster images and bitlines assets.

use std::path::Path;

use image::{imageops, DynamicImage, GrayImage, Luma, Rgb, RgbImage};

use crate::{formats::BitLines, CellGeometry, PixelBuffer, Result};

pub const LED_ON_COLOR: Rgb<u8> = Rgb([0xFF, 0xFF, 0x00]);
pub const LED_OFF_COLOR: Rgb<u8> = Rgb([0x55, 0x55, 0x55]);
pub const BACKGROUND_COLOR: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Invert gray levels before thresholding (dark artwork on light background).
    pub invert: bool,
    /// Nearest neighbour resize to `(width, height)`.
    pub resize: Option<(u32, u32)>,
    /// Gray level at or above which a pixel is lit.
    pub threshold: u8,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            invert: false,
            resize: None,
            threshold: 255,
        }
    }
}

pub fn bitlines_from_image(image: &DynamicImage, options: &ImportOptions) -> BitLines {
    let mut gray = image.to_luma8();
    if options.invert {
        imageops::invert(&mut gray);
    }
    if let Some((width, height)) = options.resize {
        gray = imageops::resize(&gray, width, height, imageops::FilterType::Nearest);
    }
    let lines = gray
        .rows()
        .map(|row| row.map(|Luma([level])| if *level >= options.threshold { '1' } else { '0' }).collect())
        .collect();
    BitLines::new(lines)
}

/// # Errors
///
/// Returns `Image` if the file can't be opened or decoded.
pub fn load_bitlines_from_image(path: &Path, options: &ImportOptions) -> Result<BitLines> {
    let image = image::open(path)?;
    Ok(bitlines_from_image(&image, options))
}

/// Renders bitlines as a black and white image, lit pixels white.
pub fn image_from_bitlines(bitlines: &BitLines) -> GrayImage {
    let bitmap = bitlines.to_bitmap();
    GrayImage::from_fn(bitmap.width() as u32, bitmap.height() as u32, |x, y| {
        if bitmap.get_pixel(x as usize, y as usize) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Draws the buffer the way the LED panel looks: one square dot per cell.
pub fn buffer_to_image(buffer: &PixelBuffer, geometry: &CellGeometry) -> RgbImage {
    let (width, height) = geometry.canvas_size(buffer.size());
    let cell = geometry.cell_size();
    let led = geometry.led_size.min(cell);
    RgbImage::from_fn(width, height, |px, py| {
        if px % cell >= led || py % cell >= led {
            return BACKGROUND_COLOR;
        }
        if buffer.is_on((px / cell) as i32, (py / cell) as i32) {
            LED_ON_COLOR
        } else {
            LED_OFF_COLOR
        }
    })
}
