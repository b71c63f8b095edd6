//! yt-dlp wrapper for video downloads
//!
//! The engine does all the heavy lifting: stream selection, fetching,
//! and muxing into the requested container. This module finds the
//! binary, builds the invocation, and maps the engine's stderr into the
//! failure taxonomy the orchestrator reports on.

use crate::api::VideoId;
use crate::downloader::options::DownloadOptions;
use crate::downloader::traits::MediaFetcher;
use crate::utils::error::DownloadError;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, info};

/// Downloader backed by a yt-dlp subprocess.
pub struct YtDlpFetcher {
    ytdlp_path: PathBuf,
}

impl YtDlpFetcher {
    /// Initialize the fetcher and verify yt-dlp availability.
    pub fn new() -> Result<Self, DownloadError> {
        let ytdlp_path = find_ytdlp().ok_or(DownloadError::EngineNotFound)?;
        info!("found yt-dlp at {}", ytdlp_path.display());
        Ok(Self { ytdlp_path })
    }

    /// Use a specific binary instead of searching PATH.
    pub fn with_binary(ytdlp_path: PathBuf) -> Self {
        Self { ytdlp_path }
    }

    /// Get the path to the yt-dlp binary being used.
    pub fn ytdlp_path(&self) -> &PathBuf {
        &self.ytdlp_path
    }

    fn build_args(url: &str, options: &DownloadOptions) -> Vec<String> {
        vec![
            "-f".to_string(),
            options.format_selector.clone(),
            "--merge-output-format".to_string(),
            options.container.clone(),
            "-o".to_string(),
            options.output_template(),
            "--no-warnings".to_string(),
            "--newline".to_string(),
            url.to_string(),
        ]
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn fetch(
        &self,
        video: &VideoId,
        options: &DownloadOptions,
    ) -> Result<(), DownloadError> {
        let url = video.watch_url();
        info!("downloading {}", url);

        let args = Self::build_args(&url, options);
        debug!("yt-dlp {}", args.join(" "));

        let output = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .output()
            .await?;

        if output.status.success() {
            info!("download finished for {}", url);
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(classify_failure(&stderr))
    }
}

/// Find the yt-dlp binary on PATH.
pub fn find_ytdlp() -> Option<PathBuf> {
    which::which("yt-dlp").ok()
}

/// Map the engine's stderr to a failure kind.
///
/// yt-dlp prefixes fatal problems with `ERROR:`; the wording of that
/// line is the only signal available for telling a network failure from
/// a page-layout change from a broken mux step.
pub fn classify_failure(stderr: &str) -> DownloadError {
    let message = stderr
        .lines()
        .find(|line| line.contains("ERROR:"))
        .or_else(|| stderr.lines().rev().find(|line| !line.trim().is_empty()))
        .unwrap_or("yt-dlp exited with an error")
        .trim()
        .to_string();

    let lowered = message.to_ascii_lowercase();

    if lowered.contains("postprocess") || lowered.contains("ffmpeg") || lowered.contains("merging")
    {
        DownloadError::PostProcessing(message)
    } else if lowered.contains("unable to extract")
        || lowered.contains("unsupported url")
        || lowered.contains("no video formats")
        || lowered.contains("requested format is not available")
    {
        DownloadError::Extraction(message)
    } else if lowered.contains("unable to download")
        || lowered.contains("http error")
        || lowered.contains("connection")
        || lowered.contains("timed out")
        || lowered.contains("unavailable")
        || lowered.contains("private video")
        || lowered.contains("removed")
    {
        DownloadError::Download(message)
    } else {
        DownloadError::Unknown(message)
    }
}
