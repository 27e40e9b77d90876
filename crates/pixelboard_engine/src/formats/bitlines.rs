use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Bitmap, EngineError, Result, Size};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BitLines {
    pub bitlines: Vec<String>,
}

impl BitLines {
    pub fn new(bitlines: Vec<String>) -> Self {
        Self { bitlines }
    }

    /// # Errors
    ///
    /// Returns `Json` if `text` isn't a bitlines document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns `Json` if the document can't be read.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// # Errors
    ///
    /// Serialization errors only.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns `Io` or `Json` on read failures.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// # Errors
    ///
    /// Returns `Io` on write failures.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bitlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitlines.is_empty()
    }

    /// Checks that this is a rectangular `'0'`/`'1'` grid and returns its size.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` for empty documents, ragged rows or characters other than `'0'`/`'1'`.
    pub fn validate(&self) -> Result<Size> {
        let Some(first) = self.bitlines.first() else {
            return Err(EngineError::decode("bitlines document has no rows"));
        };
        let width = first.len();
        if width == 0 {
            return Err(EngineError::decode("bitlines rows are empty"));
        }
        for (y, line) in self.bitlines.iter().enumerate() {
            if line.len() != width {
                return Err(EngineError::decode(format!("row {y} has length {}, expected {width}", line.len())));
            }
            if let Some(bad) = line.chars().find(|c| *c != '0' && *c != '1') {
                return Err(EngineError::decode(format!("row {y} contains invalid character '{bad}'")));
            }
        }
        Ok(Size::new(width, self.bitlines.len()))
    }

    /// Lenient conversion for image assets: ragged rows are padded.
    pub fn to_bitmap(&self) -> Bitmap {
        Bitmap::from_bitlines(&self.bitlines)
    }
}
