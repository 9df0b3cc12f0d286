//! YouTube Data API v3 search backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::{SearchError, VideoCandidate, VideoSearcher};
use crate::config::YouTubeConfig;
use crate::youtube::{http_client, non_blank, resolve_access_token, ApiErrorBody};

#[derive(Debug, Clone)]
enum Credential {
    ApiKey(String),
    Bearer(String),
}

/// Search backend using `search.list`.
pub struct YouTubeSearcher {
    client: Client,
    base_url: String,
    region_code: Option<String>,
    credential: Credential,
}

impl YouTubeSearcher {
    /// Create a searcher. An API key is preferred; an OAuth token also works.
    pub fn new(config: &YouTubeConfig) -> Result<Self, SearchError> {
        let credential = match non_blank(config.api_key.as_deref()) {
            Some(key) => Credential::ApiKey(key),
            None => resolve_access_token(config)
                .map(Credential::Bearer)
                .ok_or_else(|| {
                    SearchError::NotConfigured(
                        "YouTube API key or access token is required (SETLIST2TUBE_YOUTUBE__API_KEY)"
                            .to_string(),
                    )
                })?,
        };

        Ok(Self {
            client: http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            region_code: non_blank(config.region_code.as_deref()),
            credential,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Credential::ApiKey(key) => request.query(&[("key", key.as_str())]),
            Credential::Bearer(token) => request.bearer_auth(token),
        }
    }
}

#[async_trait]
impl VideoSearcher for YouTubeSearcher {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Option<VideoCandidate>, SearchError> {
        let url = format!("{}/search", self.base_url);
        let max_results = max_results.max(1).to_string();

        let mut params = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("order", "relevance"),
            ("q", query),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(region) = &self.region_code {
            params.push(("regionCode", region.as_str()));
        }

        debug!("YouTube search: q={:?}", query);

        let response = self
            .authorize(self.client.get(&url).query(&params))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = ApiErrorBody::parse(&response.text().await.unwrap_or_default());
            if status == StatusCode::FORBIDDEN && body.is_quota_exceeded() {
                return Err(SearchError::QuotaExceeded);
            }
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message: body.message,
            });
        }

        let data: SearchListResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        Ok(data.into_top_candidate())
    }
}

// ============================================================================
// API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
}

impl SearchListResponse {
    fn into_top_candidate(self) -> Option<VideoCandidate> {
        self.items.into_iter().find_map(|item| {
            let video_id = item.id.video_id?;
            let snippet = item.snippet.unwrap_or_default();
            Some(VideoCandidate {
                video_id,
                title: snippet.title,
                channel_name: snippet.channel_title,
            })
        })
    }
}
