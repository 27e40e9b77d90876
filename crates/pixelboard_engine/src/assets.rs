//! Directory backed glyph and image assets.
//!
//! Every asset is a bitlines JSON document named after what it shows: `A.json`, `7.json`,
//! `logo.json`. The colon is stored as `dois-pontos.json`.

use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use parking_lot::RwLock;

use crate::{formats::BitLines, Bitmap, EngineError, Glyph, GlyphLookup, Result};

/// File name (without extension) the colon glyph is stored under.
pub const COLON_ASSET_NAME: &str = "dois-pontos";

/// Maps a character to the name of its asset file.
pub fn asset_name(ch: char) -> String {
    match ch {
        ':' => COLON_ASSET_NAME.to_string(),
        _ => ch.to_string(),
    }
}

pub struct AssetStore {
    dir: PathBuf,
    glyphs: RwLock<HashMap<char, Glyph>>,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            glyphs: RwLock::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    fn load_bitlines(&self, name: &str) -> Result<BitLines> {
        let path = self.asset_path(name);
        if !path.exists() {
            return Err(EngineError::asset_not_found(name));
        }
        let file = File::open(&path)?;
        BitLines::from_reader(BufReader::new(file))
    }

    /// Loads the glyph for `ch`, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns `AssetNotFound` if there is no asset for `ch`, or an I/O or JSON error if it can't be read.
    pub fn load_glyph(&self, ch: char) -> Result<Glyph> {
        let lines = self.load_bitlines(&asset_name(ch))?;
        Ok(Glyph::from_bitlines(ch, &lines.bitlines))
    }

    /// # Errors
    ///
    /// Returns `AssetNotFound` if there is no image `name`, or an I/O or JSON error if it can't be read.
    pub fn load_image(&self, name: &str) -> Result<Bitmap> {
        Ok(self.load_bitlines(name)?.to_bitmap())
    }

    pub fn cached_glyphs(&self) -> usize {
        self.glyphs.read().len()
    }
}

impl GlyphLookup for AssetStore {
    fn glyph(&self, ch: char) -> Option<Glyph> {
        if let Some(glyph) = self.glyphs.read().get(&ch) {
            return Some(*glyph);
        }
        match self.load_glyph(ch) {
            Ok(glyph) => {
                log::debug!("loaded glyph '{ch}' from {}", self.dir.display());
                self.glyphs.write().insert(ch, glyph);
                Some(glyph)
            }
            Err(err) => {
                // misses aren't cached, the asset may show up later
                log::warn!("Glyph '{ch}' not available: {err}");
                None
            }
        }
    }
}
