//! Unified error types for pixelboard_engine

use thiserror::Error;

use crate::Size;

/// Main error type for pixelboard_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === Buffer Errors ===
    #[error("Pixel ({x}, {y}) out of range for {width}x{height} buffer")]
    OutOfRange { x: i32, y: i32, width: usize, height: usize },

    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: Size, actual: Size },

    #[error("Invalid output dimensions {width}x{height} (width must be a multiple of 8, height must be even)")]
    InvalidDimensions { width: usize, height: usize },

    // === Asset Errors ===
    #[error("Asset not found: {name}")]
    AssetNotFound { name: String },

    // === Decoding Errors ===
    #[error("Decode error: {message}")]
    DecodeError { message: String },

    // === External Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for pixelboard_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create a decode error from any displayable type
    pub fn decode(msg: impl std::fmt::Display) -> Self {
        Self::DecodeError { message: msg.to_string() }
    }

    pub fn asset_not_found(name: impl Into<String>) -> Self {
        Self::AssetNotFound { name: name.into() }
    }

    pub fn size_mismatch(expected: impl Into<Size>, actual: impl Into<Size>) -> Self {
        Self::SizeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
