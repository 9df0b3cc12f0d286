//! Setlist sources.
//!
//! A `SetlistSource` turns a setlist page URL into an ordered list of songs.
//! The only backend is setlist.fm.

mod setlistfm;
mod types;
mod url;

pub use setlistfm::SetlistFmClient;
pub use types::*;
pub use url::parse_setlist_url;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching a setlist.
#[derive(Debug, Error)]
pub enum SetlistError {
    /// The URL is not a setlist.fm setlist page.
    #[error("Invalid setlist URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Setlist not found (404).
    #[error("Setlist not found: {0}. Please check the URL and try again")]
    NotFound(String),

    /// API key rejected.
    #[error("Invalid setlist.fm API key. Please check your configuration")]
    Unauthorized,

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please try again later")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for setlist sources.
#[async_trait]
pub trait SetlistSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Fetch the setlist behind a page URL.
    async fn fetch(&self, url: &str) -> Result<SetlistInfo, SetlistError>;
}
