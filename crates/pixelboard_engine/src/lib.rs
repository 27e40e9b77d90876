#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions
)]
mod error;
pub use error::*;

mod position;
pub use position::*;

mod pixel_buffer;
pub use pixel_buffer::*;

mod glyph;
pub use glyph::*;

mod bitmap;
pub use bitmap::*;

pub mod formats;
pub use formats::*;

pub mod codec;
pub use codec::PackedBitmap;

pub mod rasterizer;

mod assets;
pub use assets::*;

pub mod brushes;

mod session;
pub use session::*;

pub mod scoreboard;
pub use scoreboard::{ClockUpdater, Scoreboard, ScoreboardLayout};

pub mod image_io;
