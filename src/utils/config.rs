//! Run configuration
//!
//! Everything the operator edits lives in one JSON file: the channels to
//! watch, where downloads land, and where the credential files sit. The
//! whole record is constructed once at startup and passed by value into
//! the orchestrator; nothing here is global.

use crate::downloader::DownloadOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One watched channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Display name used in logs and the end-of-run report.
    pub name: String,
    /// Opaque channel identifier understood by the platform API.
    pub channel_id: String,
    /// How many of the most recent uploads to download.
    pub num_videos: u32,
}

/// Application configuration, deserialized from a JSON file.
///
/// Channels are kept in file order; the batch processes them in exactly
/// that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub channels: Vec<ChannelSpec>,

    /// Where downloaded media files are written.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Persisted credential record (created on first grant).
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    /// OAuth client secret file, needed only for interactive consent.
    #[serde(default = "default_client_secret_path")]
    pub client_secret_path: PathBuf,

    /// Format selector passed to the download engine.
    #[serde(default = "default_format")]
    pub format: String,

    /// Output container the engine muxes into.
    #[serde(default = "default_container")]
    pub container: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            download_dir: default_download_dir(),
            token_path: default_token_path(),
            client_secret_path: default_client_secret_path(),
            format: default_format(),
            container: default_container(),
        }
    }
}

impl AppConfig {
    /// Load the configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read configuration file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Constant download options derived from this configuration.
    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            format_selector: self.format.clone(),
            container: self.container.clone(),
            destination: self.download_dir.clone(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("./downloads"))
}

fn default_token_path() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_client_secret_path() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_format() -> String {
    // Maximum quality; multiple GBs per video for long uploads.
    "bestvideo+bestaudio/best".to_string()
}

fn default_container() -> String {
    "mp4".to_string()
}
