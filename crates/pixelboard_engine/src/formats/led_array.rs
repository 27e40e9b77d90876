use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

use crate::{EngineError, PixelBuffer, Result, Size};

/// Cell payload of a [`LedArrayDocument`].
///
/// Written as base64 of the LSB-first packed cell array. Older documents store one number per cell,
/// those are still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedData {
    Packed(String),
    Cells(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedArrayDocument {
    pub width: usize,
    pub height: usize,
    pub data: LedData,
}

/// Packs a flat cell array 8 cells per byte, bit 0 = first cell.
pub fn pack_cells(cells: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; cells.len().div_ceil(8)];
    for (i, _) in cells.iter().enumerate().filter(|&(_, &on)| on) {
        bytes[i / 8] |= 1 << (i % 8);
    }
    bytes
}

/// Inverse of [`pack_cells`]; `count` is the number of cells to decode.
pub fn unpack_cells(bytes: &[u8], count: usize) -> Vec<bool> {
    (0..count).map(|i| bytes.get(i / 8).is_some_and(|b| b & (1 << (i % 8)) != 0)).collect()
}

impl LedArrayDocument {
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            data: LedData::Packed(general_purpose::STANDARD.encode(pack_cells(buffer.cells()))),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// # Errors
    ///
    /// Returns `Json` if `text` isn't a LED array document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    ///
    /// Serialization errors only.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        if pretty {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(serde_json::to_string(self)?)
        }
    }

    fn decode_cells(&self) -> Result<Vec<bool>> {
        let count = self
            .width
            .checked_mul(self.height)
            .ok_or_else(|| EngineError::decode(format!("dimensions {} are too large", self.size())))?;
        match &self.data {
            LedData::Packed(encoded) => {
                let bytes = general_purpose::STANDARD.decode(encoded)?;
                let expected = count.div_ceil(8);
                if bytes.len() != expected {
                    return Err(EngineError::decode(format!("packed data has {} bytes, expected {expected}", bytes.len())));
                }
                Ok(unpack_cells(&bytes, count))
            }
            LedData::Cells(cells) => {
                if cells.len() != count {
                    return Err(EngineError::decode(format!("cell array has {} entries, expected {count}", cells.len())));
                }
                Ok(cells.iter().map(|&c| c != 0).collect())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `DecodeError` for zero dimensions or a payload that doesn't match them.
    pub fn to_buffer(&self) -> Result<PixelBuffer> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::decode(format!("invalid dimensions {}", self.size())));
        }
        let cells = self.decode_cells()?;
        let mut buffer = PixelBuffer::new(self.width, self.height);
        buffer.replace_cells(&cells)?;
        Ok(buffer)
    }

    /// Loads this document into an existing buffer of the same size.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the declared size differs from `target`, or `DecodeError` for a
    /// malformed payload. `target` is left unmodified on any error.
    pub fn import_into(&self, target: &mut PixelBuffer) -> Result<()> {
        if self.size() != target.size() {
            return Err(EngineError::size_mismatch(target.size(), self.size()));
        }
        let cells = self.decode_cells()?;
        target.replace_cells(&cells)
    }
}
