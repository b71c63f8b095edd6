use crate::api::models::VideoId;
use crate::utils::error::LookupError;
use async_trait::async_trait;

/// Capability interface over the platform's channel metadata API.
///
/// This trait isolates the lister and orchestrator from the concrete
/// HTTP client so they can be exercised against fakes without network
/// access.
#[async_trait]
pub trait ChannelCatalog: Send + Sync {
    /// Resolve the identifier of a channel's uploads collection.
    ///
    /// Returns `None` when no channel matches `channel_id`; that is a
    /// "nothing to do" outcome, not an error.
    async fn uploads_playlist(&self, channel_id: &str) -> Result<Option<String>, LookupError>;

    /// List up to `count` entries of a playlist as video identifiers,
    /// newest first. Ordering is guaranteed by the remote service, not
    /// computed locally.
    async fn playlist_videos(
        &self,
        playlist_id: &str,
        count: u32,
    ) -> Result<Vec<VideoId>, LookupError>;
}
