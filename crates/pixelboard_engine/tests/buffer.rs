//! Tests for the pixel buffer

use pixelboard_engine::{EngineError, PixelBuffer, Size};

#[test]
fn test_new_buffer_is_off() {
    let buffer = PixelBuffer::new(256, 32);
    assert_eq!(buffer.size(), Size::new(256, 32));
    assert_eq!(buffer.cells().len(), 256 * 32);
    assert_eq!(buffer.count_on(), 0);
}

#[test]
fn test_get_set() {
    let mut buffer = PixelBuffer::new(10, 5);
    buffer.set(9, 4, true).unwrap();
    assert!(buffer.get(9, 4).unwrap());
    assert!(!buffer.get(0, 0).unwrap());
    buffer.set(9, 4, false).unwrap();
    assert!(!buffer.get(9, 4).unwrap());
}

#[test]
fn test_out_of_range_fails() {
    let mut buffer = PixelBuffer::new(10, 5);
    for (x, y) in [(10, 0), (0, 5), (-1, 0), (0, -1)] {
        assert!(matches!(buffer.get(x, y), Err(EngineError::OutOfRange { .. })), "get({x}, {y})");
        assert!(matches!(buffer.set(x, y, true), Err(EngineError::OutOfRange { .. })), "set({x}, {y})");
    }
    assert_eq!(buffer.count_on(), 0);
}

#[test]
fn test_clipped_access() {
    let mut buffer = PixelBuffer::new(4, 4);
    assert!(!buffer.set_clipped(4, 0, true));
    assert!(!buffer.set_clipped(-1, 2, true));
    assert!(buffer.set_clipped(3, 3, true));
    assert!(buffer.is_on(3, 3));
    assert!(!buffer.is_on(100, 100));
    assert_eq!(buffer.count_on(), 1);
}

#[test]
fn test_clear_is_idempotent() {
    let mut once = PixelBuffer::new(16, 8);
    once.fill_region(2, 2, 5, 5, true);
    let mut twice = once.clone();

    once.clear();
    twice.clear();
    twice.clear();

    assert_eq!(once, twice);
    assert_eq!(twice.count_on(), 0);
}

#[test]
fn test_fill_region() {
    let mut buffer = PixelBuffer::new(8, 8);
    buffer.fill(true);
    buffer.fill_region(2, 3, 3, 2, false);
    assert_eq!(buffer.count_on(), 64 - 6);
    assert!(!buffer.get(2, 3).unwrap());
    assert!(!buffer.get(4, 4).unwrap());
    assert!(buffer.get(5, 4).unwrap());
    assert!(buffer.get(2, 5).unwrap());
}

#[test]
fn test_fill_region_outside_is_noop() {
    let mut buffer = PixelBuffer::new(8, 8);
    buffer.fill_region(20, 20, 4, 4, true);
    buffer.fill_region(-10, 0, 5, 8, true);
    assert_eq!(buffer.count_on(), 0);
}

#[test]
fn test_replace_cells() {
    let mut buffer = PixelBuffer::new(2, 2);
    buffer.replace_cells(&[true, false, false, true]).unwrap();
    assert!(buffer.get(0, 0).unwrap());
    assert!(buffer.get(1, 1).unwrap());

    let err = buffer.replace_cells(&[true; 6]).unwrap_err();
    assert!(matches!(err, EngineError::SizeMismatch { .. }));
    assert_eq!(buffer.count_on(), 2);
}

#[test]
fn test_info() {
    let mut buffer = PixelBuffer::new(4, 2);
    buffer.fill_region(0, 0, 3, 1, true);
    let info = buffer.info();
    assert_eq!(info.width, 4);
    assert_eq!(info.height, 2);
    assert_eq!(info.total, 8);
    assert_eq!(info.leds_on, 3);
    assert_eq!(info.leds_off, 5);
}
