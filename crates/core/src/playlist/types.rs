//! Types for playlist creation and writes.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playlist visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistPrivacy {
    #[default]
    Private,
    Unlisted,
    Public,
}

impl PlaylistPrivacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Unlisted => "unlisted",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for PlaylistPrivacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaylistPrivacy {
    type Err = PlaylistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "unlisted" => Ok(Self::Unlisted),
            "public" => Ok(Self::Public),
            other => Err(PlaylistError::InvalidPrivacy(other.to_string())),
        }
    }
}

/// Request to create a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlaylist {
    pub title: String,
    pub description: String,
    pub privacy: PlaylistPrivacy,
}

/// Errors that can occur when writing playlists.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Playlist API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse playlist response: {0}")]
    ParseError(String),

    #[error("Playlist sink not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid privacy setting '{0}' (expected private, unlisted or public)")]
    InvalidPrivacy(String),
}

/// Trait for playlist backends.
#[async_trait]
pub trait PlaylistSink: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Create a playlist and return its ID.
    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<String, PlaylistError>;

    /// Append a video to a playlist.
    async fn add_video(&self, playlist_id: &str, video_id: &str) -> Result<(), PlaylistError>;

    /// Public URL of a playlist.
    fn playlist_url(&self, playlist_id: &str) -> String {
        format!("https://www.youtube.com/playlist?list={}", playlist_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privacy_parse() {
        assert_eq!("private".parse::<PlaylistPrivacy>().unwrap(), PlaylistPrivacy::Private);
        assert_eq!(" Unlisted ".parse::<PlaylistPrivacy>().unwrap(), PlaylistPrivacy::Unlisted);
        assert_eq!("PUBLIC".parse::<PlaylistPrivacy>().unwrap(), PlaylistPrivacy::Public);
        assert!(matches!(
            "friends".parse::<PlaylistPrivacy>(),
            Err(PlaylistError::InvalidPrivacy(_))
        ));
    }

    #[test]
    fn test_privacy_serialization() {
        assert_eq!(
            serde_json::to_string(&PlaylistPrivacy::Unlisted).unwrap(),
            "\"unlisted\""
        );
        assert_eq!(PlaylistPrivacy::default(), PlaylistPrivacy::Private);
    }
}
