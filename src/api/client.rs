//! Typed client for the YouTube Data API v3
//!
//! Two read-only calls are used: `channels.list` keyed by channel id to
//! resolve the uploads playlist, and `playlistItems.list` to page the
//! newest uploads. Both carry the bearer credential obtained by the
//! auth module.

use crate::api::models::{
    ApiErrorResponse, ChannelListResponse, PlaylistItemListResponse, VideoId,
};
use crate::api::traits::ChannelCatalog;
use crate::utils::error::LookupError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

pub struct YouTubeClient {
    http: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl YouTubeClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base(API_BASE_URL, access_token)
    }

    /// Client against an alternate base URL.
    pub fn with_base(api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            access_token: access_token.into(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let url = format!("{}/{}", self.api_base, resource);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(parse_error_response(response).await);
        }

        Ok(response.json().await?)
    }
}

/// Map a non-2xx response into a [`LookupError`] kind, pulling the
/// human-readable message out of the API's error envelope when present.
async fn parse_error_response(response: reqwest::Response) -> LookupError {
    let status = response.status();

    if status.as_u16() == 429 {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        return LookupError::RateLimited { retry_after };
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    match status.as_u16() {
        // 403 covers both permission problems and quota exhaustion; the
        // message carries the API's reason either way.
        401 | 403 => LookupError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        code => LookupError::Api {
            status: code,
            message,
        },
    }
}

#[async_trait]
impl ChannelCatalog for YouTubeClient {
    async fn uploads_playlist(&self, channel_id: &str) -> Result<Option<String>, LookupError> {
        let response: ChannelListResponse = self
            .get("channels", &[("part", "contentDetails"), ("id", channel_id)])
            .await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|channel| channel.content_details)
            .and_then(|details| details.related_playlists)
            .and_then(|playlists| playlists.uploads))
    }

    async fn playlist_videos(
        &self,
        playlist_id: &str,
        count: u32,
    ) -> Result<Vec<VideoId>, LookupError> {
        let max_results = count.to_string();
        let response: PlaylistItemListResponse = self
            .get(
                "playlistItems",
                &[
                    ("part", "snippet"),
                    ("playlistId", playlist_id),
                    ("maxResults", &max_results),
                ],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.snippet)
            .filter_map(|snippet| snippet.resource_id.video_id)
            .map(VideoId::new)
            .collect())
    }
}
