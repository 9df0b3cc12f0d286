//! Types for the video search system.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The best-ranked video for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCandidate {
    /// Platform video ID.
    pub video_id: String,
    /// Video title.
    pub title: String,
    /// Uploading channel.
    pub channel_name: String,
}

impl VideoCandidate {
    /// Watch URL for the video.
    pub fn watch_url(&self) -> String {
        watch_url(&self.video_id)
    }
}

/// Watch URL for a YouTube video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Search API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Search quota exceeded on the provider side")]
    QuotaExceeded,

    #[error("Failed to parse search response: {0}")]
    ParseError(String),

    #[error("Searcher not configured: {0}")]
    NotConfigured(String),
}

/// Trait for video search backends.
#[async_trait]
pub trait VideoSearcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Search for `query`, returning the top result.
    ///
    /// `max_results` is a hint for how many results the backend should rank
    /// before picking the first one.
    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Option<VideoCandidate>, SearchError>;
}
