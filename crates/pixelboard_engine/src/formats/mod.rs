//! JSON bitmap documents.
//!
//! - [`BitLines`] - `{ "bitlines": [...] }`, one `'0'`/`'1'` string per row. Used for glyph and
//!   image assets and for the unfolded textual export.
//! - [`LedArrayDocument`] - `{ "width", "height", "data" }` with base64 packed cells.

mod bitlines;
pub use bitlines::*;

mod led_array;
pub use led_array::*;
