//! Batch orchestrator
//!
//! Drives the end-to-end run: for each configured channel, in
//! configuration order, list the newest uploads and download each one in
//! turn. Every failure below authentication is contained here — a failed
//! lookup skips the channel, a failed download skips the video, and the
//! run always covers the full configured input set.

use crate::api::ChannelCatalog;
use crate::downloader::{DownloadOptions, MediaFetcher};
use crate::lister::list_recent_videos;
use crate::utils::config::ChannelSpec;
use tracing::{error, info, warn};

/// Per-channel outcome for the end-of-run summary.
#[derive(Debug)]
pub struct ChannelOutcome {
    pub channel: String,
    /// Video identifiers the lister returned.
    pub listed: usize,
    pub downloaded: usize,
    pub failed: usize,
    /// Set when the channel produced nothing to download.
    pub skipped: Option<String>,
}

impl ChannelOutcome {
    fn skipped(channel: &str, reason: impl Into<String>) -> Self {
        Self {
            channel: channel.to_string(),
            listed: 0,
            downloaded: 0,
            failed: 0,
            skipped: Some(reason.into()),
        }
    }
}

/// Aggregate of a whole run. Informational only: the process exit code
/// does not depend on it.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub channels: Vec<ChannelOutcome>,
}

impl BatchReport {
    pub fn downloads_attempted(&self) -> usize {
        self.channels.iter().map(|c| c.downloaded + c.failed).sum()
    }

    pub fn downloads_failed(&self) -> usize {
        self.channels.iter().map(|c| c.failed).sum()
    }

    /// Emit the summary the run ends with.
    pub fn log_summary(&self) {
        for outcome in &self.channels {
            match &outcome.skipped {
                Some(reason) => info!("{}: skipped ({})", outcome.channel, reason),
                None => info!(
                    "{}: {} of {} downloaded, {} failed",
                    outcome.channel, outcome.downloaded, outcome.listed, outcome.failed
                ),
            }
        }
        info!(
            "run complete: {} downloads attempted, {} failed",
            self.downloads_attempted(),
            self.downloads_failed()
        );
    }
}

/// Process every configured channel once, strictly sequentially.
pub async fn run_batch<C, F>(
    catalog: &C,
    fetcher: &F,
    channels: &[ChannelSpec],
    options: &DownloadOptions,
) -> BatchReport
where
    C: ChannelCatalog + ?Sized,
    F: MediaFetcher + ?Sized,
{
    let mut report = BatchReport::default();

    for spec in channels {
        info!(
            "processing {} (ID: {}) for {} videos",
            spec.name, spec.channel_id, spec.num_videos
        );

        let videos = match list_recent_videos(catalog, &spec.channel_id, spec.num_videos).await {
            Ok(videos) if videos.is_empty() => {
                warn!("no videos found for channel {} (ID: {})", spec.name, spec.channel_id);
                report
                    .channels
                    .push(ChannelOutcome::skipped(&spec.name, "no videos found"));
                continue;
            }
            Ok(videos) => videos,
            Err(e) => {
                error!(
                    "lookup failed for channel {} (ID: {}): {}",
                    spec.name, spec.channel_id, e
                );
                report
                    .channels
                    .push(ChannelOutcome::skipped(&spec.name, e.to_string()));
                continue;
            }
        };

        let mut outcome = ChannelOutcome {
            channel: spec.name.clone(),
            listed: videos.len(),
            downloaded: 0,
            failed: 0,
            skipped: None,
        };

        // One at a time, and a failure never stops the rest of the list.
        for video in &videos {
            match fetcher.fetch(video, options).await {
                Ok(()) => {
                    info!("downloaded {}", video);
                    outcome.downloaded += 1;
                }
                Err(e) => {
                    error!("download of {} failed ({}): {}", video, e.kind(), e);
                    outcome.failed += 1;
                }
            }
        }

        report.channels.push(outcome);
    }

    report
}
