//! YouTube Data API v3 playlist backend.
//!
//! Writes require an OAuth access token; API keys are read-only.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{NewPlaylist, PlaylistError, PlaylistSink};
use crate::config::YouTubeConfig;
use crate::youtube::{http_client, resolve_access_token, ApiErrorBody};

/// Playlist backend using `playlists.insert` and `playlistItems.insert`.
pub struct YouTubePlaylistSink {
    client: Client,
    base_url: String,
    access_token: String,
}

impl YouTubePlaylistSink {
    /// Create a sink. Fails if no access token can be resolved.
    pub fn new(config: &YouTubeConfig) -> Result<Self, PlaylistError> {
        let access_token = resolve_access_token(config).ok_or_else(|| {
            PlaylistError::NotConfigured(format!(
                "YouTube access token is required (SETLIST2TUBE_YOUTUBE__ACCESS_TOKEN or {})",
                config.token_file.display()
            ))
        })?;

        Ok(Self {
            client: http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        resource: &str,
        part: &str,
        body: &B,
    ) -> Result<reqwest::Response, PlaylistError> {
        let url = format!("{}/{}", self.base_url, resource);

        let response = self
            .client
            .post(&url)
            .query(&[("part", part)])
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = ApiErrorBody::parse(&response.text().await.unwrap_or_default());
            return Err(PlaylistError::ApiError {
                status: status.as_u16(),
                message: body.message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl PlaylistSink for YouTubePlaylistSink {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<String, PlaylistError> {
        let body = PlaylistInsert {
            snippet: PlaylistSnippet {
                title: &playlist.title,
                description: &playlist.description,
            },
            status: PlaylistStatus {
                privacy_status: playlist.privacy.as_str(),
            },
        };

        let response = self.post("playlists", "snippet,status", &body).await?;
        let created: CreatedResource = response
            .json()
            .await
            .map_err(|e| PlaylistError::ParseError(e.to_string()))?;

        info!("Created playlist {} ({})", created.id, playlist.privacy);
        Ok(created.id)
    }

    async fn add_video(&self, playlist_id: &str, video_id: &str) -> Result<(), PlaylistError> {
        let body = PlaylistItemInsert {
            snippet: PlaylistItemSnippet {
                playlist_id,
                resource_id: ResourceId {
                    kind: "youtube#video",
                    video_id,
                },
            },
        };

        debug!("Adding video {} to playlist {}", video_id, playlist_id);
        self.post("playlistItems", "snippet", &body).await?;
        Ok(())
    }
}

// ============================================================================
// API Request/Response Types (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct PlaylistInsert<'a> {
    snippet: PlaylistSnippet<'a>,
    status: PlaylistStatus<'a>,
}

#[derive(Debug, Serialize)]
struct PlaylistSnippet<'a> {
    title: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistStatus<'a> {
    privacy_status: &'a str,
}

#[derive(Debug, Serialize)]
struct PlaylistItemInsert<'a> {
    snippet: PlaylistItemSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet<'a> {
    playlist_id: &'a str,
    resource_id: ResourceId<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId<'a> {
    kind: &'a str,
    video_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::PlaylistPrivacy;

    #[test]
    fn test_playlist_insert_body() {
        let body = PlaylistInsert {
            snippet: PlaylistSnippet {
                title: "Radiohead - Madison Square Garden (26-07-2018)",
                description: "Setlist",
            },
            status: PlaylistStatus {
                privacy_status: PlaylistPrivacy::Unlisted.as_str(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"]["privacyStatus"], "unlisted");
        assert_eq!(
            json["snippet"]["title"],
            "Radiohead - Madison Square Garden (26-07-2018)"
        );
    }

    #[test]
    fn test_playlist_item_body() {
        let body = PlaylistItemInsert {
            snippet: PlaylistItemSnippet {
                playlist_id: "PL123",
                resource_id: ResourceId {
                    kind: "youtube#video",
                    video_id: "abc",
                },
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["snippet"]["playlistId"], "PL123");
        assert_eq!(json["snippet"]["resourceId"]["videoId"], "abc");
        assert_eq!(json["snippet"]["resourceId"]["kind"], "youtube#video");
    }

    #[test]
    fn test_requires_access_token() {
        let config = YouTubeConfig {
            api_key: Some("AIza-read-only".to_string()),
            token_file: "/nonexistent/token.json".into(),
            ..Default::default()
        };
        assert!(matches!(
            YouTubePlaylistSink::new(&config),
            Err(PlaylistError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_playlist_url() {
        let config = YouTubeConfig {
            access_token: Some("ya29.test".to_string()),
            ..Default::default()
        };
        let sink = YouTubePlaylistSink::new(&config).unwrap();
        assert_eq!(
            sink.playlist_url("PL123"),
            "https://www.youtube.com/playlist?list=PL123"
        );
    }
}
