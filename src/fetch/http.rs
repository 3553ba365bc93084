//! HTTP asset fetching.
//!
//! One blocking client, shared across the run, fetches handler scripts,
//! fonts, icons and the native runtime archive. There is no retry and no
//! checksum verification; a failed fetch of a required asset is fatal to
//! the whole run.

use crate::error::{Result, SetupError};
use reqwest::blocking::Client;
use std::path::Path;
use std::time::Duration;

/// Fetches remote assets over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with a default 60-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(60))
    }

    /// Create a new HTTP fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("peppy-setup/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Fetch a URL into memory.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| transport(url, e))?;

        if !response.status().is_success() {
            return Err(SetupError::Transport {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes().map_err(|e| transport(url, e))?;
        Ok(bytes.to_vec())
    }

    /// Fetch a URL to a destination file, overwriting any existing file.
    ///
    /// Returns the number of bytes written.
    pub fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64> {
        let bytes = self.fetch_bytes(url)?;
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, &bytes)?;
        tracing::debug!("fetched {} -> {} ({} bytes)", url, dest.display(), bytes.len());
        Ok(bytes.len() as u64)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn transport(url: &str, err: reqwest::Error) -> SetupError {
    SetupError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}
