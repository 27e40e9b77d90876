//! Tests for pointer driven drawing and line interpolation

use pixelboard_engine::{
    brushes::{bresenham_line, draw_line, get_line_points},
    CellGeometry, DrawMode, DrawingSession, PixelBuffer, PointerEvent, Position, Size,
};

// ═══════════════════════════════════════════════════════════════════════════
// Bresenham
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_bresenham_horizontal_line() {
    let points = bresenham_line(0, 0, 5, 0);
    assert_eq!(points, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
}

#[test]
fn test_bresenham_reverse_vertical() {
    let points = bresenham_line(0, 5, 0, 0);
    assert_eq!(points, vec![(0, 5), (0, 4), (0, 3), (0, 2), (0, 1), (0, 0)]);
}

#[test]
fn test_bresenham_single_point() {
    assert_eq!(bresenham_line(3, 3, 3, 3), vec![(3, 3)]);
}

#[test]
fn test_line_continuity() {
    let points = get_line_points(Position::new(0, 0), Position::new(10, 7));
    assert_eq!(points[0], Position::new(0, 0));
    assert_eq!(points[points.len() - 1], Position::new(10, 7));
    for pair in points.windows(2) {
        let d = pair[1] - pair[0];
        assert!(d.x.abs() <= 1 && d.y.abs() <= 1, "gap between {} and {}", pair[0], pair[1]);
    }
}

#[test]
fn test_draw_line_clips() {
    let mut buffer = PixelBuffer::new(5, 5);
    let written = draw_line(&mut buffer, Position::new(-3, 2), Position::new(8, 2), true);
    assert_eq!(written, 5);
    assert_eq!(buffer.count_on(), 5);
}

// ═══════════════════════════════════════════════════════════════════════════
// Drawing session
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_press_on_empty_cell_draws() {
    let mut buffer = PixelBuffer::new(16, 8);
    let mut session = DrawingSession::new();

    assert!(session.handle(&mut buffer, PointerEvent::new(2, 3, true)));
    assert_eq!(session.mode(), DrawMode::Draw);
    assert!(session.is_drawing());
    assert!(buffer.get(2, 3).unwrap());
}

#[test]
fn test_press_on_lit_cell_erases_whole_stroke() {
    let mut buffer = PixelBuffer::new(16, 8);
    buffer.fill(true);
    let mut session = DrawingSession::new();

    session.handle(&mut buffer, PointerEvent::new(0, 0, true));
    assert_eq!(session.mode(), DrawMode::Erase);
    session.handle(&mut buffer, PointerEvent::new(5, 0, true));

    for x in 0..=5 {
        assert!(!buffer.get(x, 0).unwrap());
    }
    assert!(buffer.get(6, 0).unwrap());
}

#[test]
fn test_sparse_moves_are_interpolated() {
    let mut buffer = PixelBuffer::new(16, 16);
    let mut session = DrawingSession::new();

    session.handle(&mut buffer, PointerEvent::new(0, 0, true));
    session.handle(&mut buffer, PointerEvent::new(10, 5, true));
    session.handle(&mut buffer, PointerEvent::new(10, 12, true));

    assert!(buffer.get(10, 5).unwrap());
    assert!(buffer.get(10, 8).unwrap());
    assert!(buffer.get(10, 12).unwrap());
    assert_eq!(buffer.count_on(), bresenham_line(0, 0, 10, 5).len() + 7);
}

#[test]
fn test_release_ends_stroke() {
    let mut buffer = PixelBuffer::new(16, 8);
    let mut session = DrawingSession::new();

    session.handle(&mut buffer, PointerEvent::new(1, 1, true));
    assert!(!session.handle(&mut buffer, PointerEvent::new(8, 1, false)));
    assert!(!session.is_drawing());

    // the next press starts a new stroke instead of joining to (1, 1)
    session.handle(&mut buffer, PointerEvent::new(8, 6, true));
    assert_eq!(buffer.count_on(), 2);
}

#[test]
fn test_new_stroke_picks_mode_again() {
    let mut buffer = PixelBuffer::new(8, 8);
    let mut session = DrawingSession::new();

    session.handle(&mut buffer, PointerEvent::new(1, 1, true));
    session.leave();
    session.handle(&mut buffer, PointerEvent::new(1, 1, true));
    assert_eq!(session.mode(), DrawMode::Erase);
    assert!(!buffer.get(1, 1).unwrap());
}

#[test]
fn test_press_outside_is_ignored() {
    let mut buffer = PixelBuffer::new(8, 8);
    let mut session = DrawingSession::new();

    assert!(!session.handle(&mut buffer, PointerEvent::new(8, 0, true)));
    assert!(!session.is_drawing());
    assert_eq!(buffer.count_on(), 0);
}

#[test]
fn test_move_outside_clips() {
    let mut buffer = PixelBuffer::new(8, 8);
    let mut session = DrawingSession::new();

    session.handle(&mut buffer, PointerEvent::new(5, 0, true));
    session.handle(&mut buffer, PointerEvent::new(12, 0, true));
    assert_eq!(buffer.count_on(), 3);
    assert!(session.is_drawing());
}

// ═══════════════════════════════════════════════════════════════════════════
// Cell geometry
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cell_at() {
    let geometry = CellGeometry::new(4, 1);
    let size = Size::new(256, 32);

    assert_eq!(geometry.cell_at(0.0, 0.0, size), Some(Position::new(0, 0)));
    assert_eq!(geometry.cell_at(4.9, 9.99, size), Some(Position::new(0, 1)));
    assert_eq!(geometry.cell_at(5.0, 10.0, size), Some(Position::new(1, 2)));
    assert_eq!(geometry.cell_at(-0.5, 0.0, size), None);
    assert_eq!(geometry.cell_at(1280.0, 0.0, size), None);
    assert_eq!(geometry.cell_at(1279.0, 159.0, size), Some(Position::new(255, 31)));
}

#[test]
fn test_canvas_size() {
    assert_eq!(CellGeometry::default().canvas_size(Size::new(256, 32)), (1280, 160));
}
