use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use pixelboard_engine::{
    codec::{OUTPUT_HEIGHT, OUTPUT_WIDTH},
    CellGeometry, ScoreboardLayout,
};
use serde::{Deserialize, Serialize};

use crate::BoardResult;

const OPTIONS_FILE: &str = "options.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory holding glyph and image `.json` assets.
    pub asset_dir: PathBuf,

    /// Base URL of the display backend.
    pub backend_url: String,

    /// Hardware panel size the packed export is folded into.
    pub output_width: usize,
    pub output_height: usize,

    /// Image asset drawn in the logo slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// LED dot size and gap of PNG previews.
    pub led_size: u32,
    pub led_padding: u32,

    pub layout: ScoreboardLayout,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets/bitfiles"),
            backend_url: "http://127.0.0.1:8000".to_string(),
            output_width: OUTPUT_WIDTH,
            output_height: OUTPUT_HEIGHT,
            logo: None,
            led_size: 4,
            led_padding: 1,
            layout: ScoreboardLayout::default(),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "GitHub", "pixelboard")
}

impl Options {
    pub fn geometry(&self) -> CellGeometry {
        CellGeometry::new(self.led_size, self.led_padding)
    }

    /// Loads the user options, falling back to defaults if none were stored.
    ///
    /// # Errors
    ///
    /// This function will return an error if the options file exists but can't be read or parsed.
    pub fn load_options() -> BoardResult<Self> {
        if let Some(proj_dirs) = project_dirs() {
            let options_file = proj_dirs.config_dir().join(OPTIONS_FILE);
            if options_file.exists() {
                return Self::load_from(&options_file);
            }
        }
        Ok(Options::default())
    }

    /// # Errors
    ///
    /// This function will return an error if `path` can't be read, isn't valid TOML or describes
    /// an empty display.
    pub fn load_from(path: &Path) -> BoardResult<Self> {
        let content = fs::read_to_string(path)?;
        let options: Options = toml::from_str(&content)?;
        options.validate().with_context(|| format!("Invalid options in {}", path.display()))?;
        Ok(options)
    }

    /// # Errors
    ///
    /// This function will return an error if the display layout has a zero dimension.
    pub fn validate(&self) -> BoardResult<()> {
        let layout = &self.layout;
        if layout.display_width == 0 || layout.display_height == 0 {
            bail!("display size {}x{} must not be empty", layout.display_width, layout.display_height);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// This function will return an error if the config directory or file can't be written.
    pub fn store_options(&self) -> BoardResult<()> {
        if let Some(proj_dirs) = project_dirs() {
            fs::create_dir_all(proj_dirs.config_dir())?;
            self.store_to(&proj_dirs.config_dir().join(OPTIONS_FILE))?;
        }
        Ok(())
    }

    /// Writes to a temp file first and moves it over `path`.
    ///
    /// # Errors
    ///
    /// This function will return an error if serialization or any file operation fails.
    pub fn store_to(&self, path: &Path) -> BoardResult<()> {
        let mut write_name = path.to_path_buf();
        write_name.set_extension("new");

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&write_name, toml_string)?;
        fs::rename(&write_name, path)?;
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(OPTIONS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_options_use_defaults() {
        let options: Options = toml::from_str(
            r#"
            backend_url = "https://example.invalid"
            logo = "stadium"

            [layout]
            team_x = 150
            "#,
        )
        .unwrap();

        assert_eq!(options.backend_url, "https://example.invalid");
        assert_eq!(options.logo.as_deref(), Some("stadium"));
        assert_eq!(options.layout.team_x, 150);
        assert_eq!(options.layout.clock_x, 10);
        assert_eq!(options.output_width, 128);
        assert_eq!(options.asset_dir, PathBuf::from("assets/bitfiles"));
    }

    #[test]
    fn test_store_and_load() {
        let path = std::env::temp_dir().join(format!("pixelboard_options_{}.toml", std::process::id()));
        let options = Options {
            output_height: 32,
            logo: Some("logo".to_string()),
            ..Default::default()
        };
        options.store_to(&path).unwrap();
        let loaded = Options::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_empty_display_is_rejected() {
        let path = std::env::temp_dir().join(format!("pixelboard_empty_display_{}.toml", std::process::id()));
        std::fs::write(&path, "[layout]\ndisplay_width = 0\n").unwrap();
        let result = Options::load_from(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
