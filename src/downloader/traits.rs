use crate::api::VideoId;
use crate::downloader::options::DownloadOptions;
use crate::utils::error::DownloadError;
use async_trait::async_trait;

/// Capability interface over the external download/extraction engine.
///
/// Isolates the orchestrator from the concrete engine so batch behavior
/// can be tested without spawning subprocesses.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Download one video into `options.destination`.
    ///
    /// Writes at most one media file, named from the video's title and
    /// the configured container extension. Partial files the engine
    /// leaves behind on failure are the engine's responsibility.
    async fn fetch(&self, video: &VideoId, options: &DownloadOptions)
        -> Result<(), DownloadError>;
}
