//! Line drawing on the pixel grid.

use crate::{PixelBuffer, Position};

/// Bresenham's line algorithm - returns points along the line
///
/// Produces a connected series of pixels from (x0, y0) to (x1, y1), both ends included.
pub fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        points.push((x, y));

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    points
}

pub fn get_line_points(from: Position, to: Position) -> Vec<Position> {
    bresenham_line(from.x, from.y, to.x, to.y).into_iter().map(Position::from).collect()
}

/// Sets every cell on the line to `value`, clipping to the buffer. Returns the number of cells written.
pub fn draw_line(buffer: &mut PixelBuffer, from: Position, to: Position, value: bool) -> usize {
    bresenham_line(from.x, from.y, to.x, to.y)
        .into_iter()
        .filter(|&(x, y)| buffer.set_clipped(x, y, value))
        .count()
}
