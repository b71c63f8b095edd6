//! Data structures for the platform API
//!
//! Typed views over the YouTube Data API v3 responses this tool consumes:
//! the channel metadata lookup (for the uploads playlist id) and the
//! playlist item listing. Only the fields we read are modeled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a single remote video.
///
/// Produced by the lister, consumed by the downloader. The canonical
/// watch URL is derived from it; nothing else is ever parsed out of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL handed to the download engine.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<Channel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub snippet: Option<PlaylistItemSnippet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub resource_id: ResourceId,
    pub title: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: Option<String>,
    pub video_id: Option<String>,
}

/// Error envelope the API wraps non-2xx responses in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_channel_list_with_uploads_playlist() {
        let raw = r#"{
            "kind": "youtube#channelListResponse",
            "items": [{
                "kind": "youtube#channel",
                "id": "UCR6LasBpceuYUhuLToKBzvQ",
                "contentDetails": {
                    "relatedPlaylists": {
                        "likes": "",
                        "uploads": "UUR6LasBpceuYUhuLToKBzvQ"
                    }
                }
            }]
        }"#;
        let response: ChannelListResponse = serde_json::from_str(raw).expect("parse");
        let uploads = response.items[0]
            .content_details
            .as_ref()
            .and_then(|d| d.related_playlists.as_ref())
            .and_then(|p| p.uploads.as_deref());
        assert_eq!(uploads, Some("UUR6LasBpceuYUhuLToKBzvQ"));
    }

    #[test]
    fn parses_empty_channel_list() {
        let raw = r#"{"kind": "youtube#channelListResponse", "pageInfo": {"totalResults": 0}}"#;
        let response: ChannelListResponse = serde_json::from_str(raw).expect("parse");
        assert!(response.items.is_empty());
    }

    #[test]
    fn parses_playlist_items_to_video_ids() {
        let raw = r#"{
            "items": [
                {"snippet": {"title": "Newest", "resourceId": {"kind": "youtube#video", "videoId": "v2"}}},
                {"snippet": {"title": "Older", "resourceId": {"kind": "youtube#video", "videoId": "v1"}}}
            ]
        }"#;
        let response: PlaylistItemListResponse = serde_json::from_str(raw).expect("parse");
        let ids: Vec<&str> = response
            .items
            .iter()
            .filter_map(|i| i.snippet.as_ref())
            .filter_map(|s| s.resource_id.video_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["v2", "v1"]);
    }

    #[test]
    fn parses_api_error_envelope() {
        let raw = r#"{"error": {"code": 403, "message": "quotaExceeded", "errors": []}}"#;
        let envelope: ApiErrorResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(envelope.error.code, 403);
        assert_eq!(envelope.error.message, "quotaExceeded");
    }

    #[test]
    fn watch_url_is_canonical() {
        let id = VideoId::new("dQw4w9WgXcQ");
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}
