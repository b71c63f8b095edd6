//! chanloader library

pub mod api;
pub mod auth;
pub mod batch;
pub mod downloader;
pub mod lister;
pub mod utils;

// Re-export main types for easier use
pub use api::{ChannelCatalog, VideoId, YouTubeClient};
pub use auth::{Authenticator, StoredToken};
pub use batch::{run_batch, BatchReport, ChannelOutcome};
pub use downloader::{DownloadOptions, MediaFetcher, YtDlpFetcher};
pub use lister::list_recent_videos;
pub use utils::{AppConfig, AuthError, ChannelSpec, DownloadError, LookupError};
