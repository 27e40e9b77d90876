//! Client for the display backend.
//!
//! Calls are blocking, single shot and never retried; a failure is reported to the caller.

use anyhow::{bail, Context};
use pixelboard_engine::{scoreboard::ScoreboardConfig, PackedBitmap};
use reqwest::blocking::{multipart, Client};

use crate::BoardResult;

pub struct RemoteClient {
    base_url: String,
    client: Client,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Sends the packed frame as the `file` field of a multipart form to `/upload`.
    ///
    /// # Errors
    ///
    /// Network failures and non-success responses.
    pub fn upload(&self, packed: &PackedBitmap) -> BoardResult<serde_json::Value> {
        let part = multipart::Part::bytes(packed.bytes().to_vec())
            .file_name("display.bin")
            .mime_str("application/octet-stream")?;
        let form = multipart::Form::new().part("file", part);

        let url = self.endpoint("upload");
        let response = self.client.post(&url).multipart(form).send().with_context(|| format!("Failed to send frame to {url}"))?;
        if !response.status().is_success() {
            bail!("Upload to {url} failed: {}", response.status());
        }
        let result = response.json::<serde_json::Value>()?;
        log::debug!("upload result: {result}");
        Ok(result)
    }

    /// Posts the scoreboard state to `/config`.
    ///
    /// # Errors
    ///
    /// Network failures and non-success responses.
    pub fn send_config(&self, config: &ScoreboardConfig) -> BoardResult<()> {
        let url = self.endpoint("config");
        let response = self.client.post(&url).json(config).send().with_context(|| format!("Failed to send config to {url}"))?;
        if !response.status().is_success() {
            bail!("Config update at {url} failed: {}", response.status());
        }
        Ok(())
    }

    /// Asks the backend to render the current frame; the body is a packed bitmap of `width`x`height`.
    ///
    /// # Errors
    ///
    /// Network failures, non-success responses and bodies of the wrong length.
    pub fn fetch_display(&self, width: usize, height: usize) -> BoardResult<PackedBitmap> {
        let url = self.endpoint("display");
        let response = self.client.post(&url).send().with_context(|| format!("Failed to request display from {url}"))?;
        if !response.status().is_success() {
            bail!("Display request at {url} failed: {}", response.status());
        }
        let bytes = response.bytes()?;
        Ok(PackedBitmap::from_bytes(bytes.to_vec(), width, height)?)
    }
}
