//! chanloader - Channel Upload Downloader
//!
//! Watches a configured set of channels on a video platform, lists each
//! channel's most recent uploads through the platform API, and downloads
//! them at best quality via yt-dlp.

use anyhow::Result;
use chanloader::api::{VideoId, YouTubeClient};
use chanloader::auth::Authenticator;
use chanloader::batch::run_batch;
use chanloader::downloader::{MediaFetcher, YtDlpFetcher};
use chanloader::utils::AppConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
struct Args {
    /// Path to the run configuration file
    #[arg(long, default_value = "chanloader.json")]
    config: PathBuf,

    /// Download a single video by identifier and exit
    #[arg(long)]
    video: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = AppConfig::load(&args.config)?;

    let fetcher = match YtDlpFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("ERROR: yt-dlp not found on PATH");
            eprintln!("Please install yt-dlp:");
            eprintln!("  pip install yt-dlp");
            eprintln!("  or: brew install yt-dlp");
            eprintln!("  or visit: https://github.com/yt-dlp/yt-dlp");
            return Err(e.into());
        }
    };

    let options = config.download_options();
    tokio::fs::create_dir_all(&options.destination).await?;

    // Single-shot mode: download one arbitrary video, no API involved.
    if let Some(video_id) = args.video {
        match fetcher.fetch(&VideoId::new(video_id), &options).await {
            Ok(()) => info!("download complete"),
            Err(e) => error!("download failed ({}): {}", e.kind(), e),
        }
        return Ok(());
    }

    // Authentication is the only failure that aborts the run.
    let authenticator =
        Authenticator::new(config.token_path.clone(), config.client_secret_path.clone());
    let token = authenticator.obtain_credentials().await?;

    let client = YouTubeClient::new(token.access_token.clone());
    let report = run_batch(&client, &fetcher, &config.channels, &options).await;
    report.log_summary();

    // Per-channel and per-video failures are reported above but never
    // change the exit status.
    Ok(())
}
