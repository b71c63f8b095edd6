//! Error handling for chanloader
//!
//! One error type per component boundary, so callers branch on cause
//! instead of on message text. Only [`AuthError`] is fatal to a run;
//! lookup and download failures are handled at the call site and the
//! batch keeps going.

use std::path::PathBuf;
use thiserror::Error;

/// Credential acquisition failures. Raised before any per-channel work
/// begins, and the only error class that terminates the process.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no cached credentials and no client secret file at {0}")]
    MissingClientSecret(PathBuf),

    #[error("credential file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential record is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid OAuth endpoint: {0}")]
    Endpoint(String),

    #[error("token refresh failed: {0}")]
    Refresh(String),

    #[error("interactive consent failed: {0}")]
    Consent(String),
}

/// Channel/playlist lookup failures. Recoverable: the orchestrator logs
/// the cause and skips the channel. "Channel not found" and "no uploads"
/// are not errors at all; the lister reports those as an empty listing.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("authorization rejected ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("rate limited by the API")]
    RateLimited { retry_after: Option<u64> },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Per-video download failures surfaced by the external engine.
/// Recoverable: the orchestrator logs the kind and moves to the next
/// video identifier.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    EngineNotFound,

    #[error("failed to run yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("download failed: {0}")]
    Download(String),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("post-processing failed: {0}")]
    PostProcessing(String),

    #[error("yt-dlp failed: {0}")]
    Unknown(String),
}

impl DownloadError {
    /// Short tag for log lines and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            DownloadError::EngineNotFound => "engine-not-found",
            DownloadError::Spawn(_) => "spawn",
            DownloadError::Download(_) => "download",
            DownloadError::Extraction(_) => "extraction",
            DownloadError::PostProcessing(_) => "post-processing",
            DownloadError::Unknown(_) => "unknown",
        }
    }
}
