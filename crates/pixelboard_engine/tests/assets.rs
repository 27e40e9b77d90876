//! Tests for the directory backed asset store

use std::{fs, path::PathBuf};

use pixelboard_engine::{asset_name, rasterizer::draw_text, AssetStore, EngineError, GlyphLookup, PixelBuffer, Size};

struct AssetDir(PathBuf);

impl AssetDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("pixelboard_assets_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn write(&self, name: &str, rows: &[&str]) {
        let json = serde_json::json!({ "bitlines": rows });
        fs::write(self.0.join(format!("{name}.json")), json.to_string()).unwrap();
    }
}

impl Drop for AssetDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_asset_name() {
    assert_eq!(asset_name(':'), "dois-pontos");
    assert_eq!(asset_name('A'), "A");
    assert_eq!(asset_name('7'), "7");
}

#[test]
fn test_glyph_is_loaded_and_cached() {
    let dir = AssetDir::new("cache");
    dir.write("A", &["1000000"]);
    let store = AssetStore::new(&dir.0);

    let glyph = store.glyph('A').unwrap();
    assert!(glyph.get_pixel(0, 0));
    assert_eq!(store.cached_glyphs(), 1);

    // cached glyphs survive the asset going away
    fs::remove_file(dir.0.join("A.json")).unwrap();
    assert_eq!(store.glyph('A'), Some(glyph));
}

#[test]
fn test_colon_uses_named_asset() {
    let dir = AssetDir::new("colon");
    dir.write("dois-pontos", &["0000000", "0001000"]);
    let store = AssetStore::new(&dir.0);

    let glyph = store.glyph(':').unwrap();
    assert_eq!(glyph.ch, ':');
    assert!(glyph.get_pixel(3, 1));
}

#[test]
fn test_missing_glyph_degrades() {
    let dir = AssetDir::new("missing");
    dir.write("1", &["1"]);
    let store = AssetStore::new(&dir.0);

    assert_eq!(store.glyph('Q'), None);
    assert_eq!(store.cached_glyphs(), 0);

    let mut buffer = PixelBuffer::new(32, 8);
    let end = draw_text(&mut buffer, "Q1", 0, 0, &store);
    assert_eq!(end, 16);
    assert!(buffer.get(8, 0).unwrap());
    assert_eq!(buffer.count_on(), 1);
}

#[test]
fn test_missing_glyph_is_retried() {
    let dir = AssetDir::new("retry");
    let store = AssetStore::new(&dir.0);
    assert_eq!(store.glyph('Z'), None);

    dir.write("Z", &["1"]);
    assert!(store.glyph('Z').is_some());
}

#[test]
fn test_load_image() {
    let dir = AssetDir::new("image");
    dir.write("logo", &["111", "1", "0101"]);
    let store = AssetStore::new(&dir.0);

    let logo = store.load_image("logo").unwrap();
    assert_eq!(logo.size(), Size::new(4, 3));

    let err = store.load_image("nothing").unwrap_err();
    assert!(matches!(err, EngineError::AssetNotFound { name } if name == "nothing"));
}

#[test]
fn test_broken_asset_is_an_error() {
    let dir = AssetDir::new("broken");
    fs::write(dir.0.join("B.json"), "{ broken").unwrap();
    let store = AssetStore::new(&dir.0);

    assert!(matches!(store.load_glyph('B'), Err(EngineError::Json(_))));
    assert_eq!(store.glyph('B'), None);
}
