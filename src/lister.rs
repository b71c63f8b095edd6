//! Channel video lister
//!
//! Resolves a channel's uploads collection and returns its newest video
//! identifiers. "No such channel" and "no uploads" come back as an empty
//! listing with a diagnostic; transport and API failures surface as
//! [`LookupError`] so callers can see the cause, though the batch treats
//! both the same way (skip the channel, keep going).

use crate::api::{ChannelCatalog, VideoId};
use crate::utils::error::LookupError;
use tracing::{debug, warn};

pub async fn list_recent_videos<C>(
    catalog: &C,
    channel_id: &str,
    count: u32,
) -> Result<Vec<VideoId>, LookupError>
where
    C: ChannelCatalog + ?Sized,
{
    debug!("resolving uploads playlist for channel {}", channel_id);

    let playlist_id = match catalog.uploads_playlist(channel_id).await? {
        Some(id) => id,
        None => {
            warn!("no channel matches id {}; check the channel ID", channel_id);
            return Ok(Vec::new());
        }
    };

    let videos = catalog.playlist_videos(&playlist_id, count).await?;
    if videos.is_empty() {
        warn!("uploads playlist {} has no entries", playlist_id);
    } else {
        debug!("listed {} videos from playlist {}", videos.len(), playlist_id);
    }

    Ok(videos)
}
