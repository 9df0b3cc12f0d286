//! Mock playlist sink for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::playlist::{NewPlaylist, PlaylistError, PlaylistSink};

/// A recorded add attempt for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAdd {
    pub playlist_id: String,
    pub video_id: String,
    /// Whether the add succeeded.
    pub success: bool,
}

/// Mock implementation of the PlaylistSink trait.
///
/// Playlists get sequential IDs (`mock-playlist-1`, ...). Individual videos
/// can be configured to fail.
///
/// # Example
///
/// ```rust,ignore
/// use setlist2tube_core::testing::MockPlaylistSink;
///
/// let sink = MockPlaylistSink::new();
/// sink.fail_video("abc").await;
///
/// assert!(sink.add_video("PL1", "abc").await.is_err());
/// assert!(sink.added_videos().await.is_empty());
/// ```
#[derive(Debug)]
pub struct MockPlaylistSink {
    /// Created playlists, in order.
    created: Arc<RwLock<Vec<NewPlaylist>>>,
    /// Every add attempt.
    adds: Arc<RwLock<Vec<RecordedAdd>>>,
    /// Videos whose add always fails.
    failing_videos: Arc<RwLock<HashSet<String>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<PlaylistError>>>,
}

impl Default for MockPlaylistSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlaylistSink {
    pub fn new() -> Self {
        Self {
            created: Arc::new(RwLock::new(Vec::new())),
            adds: Arc::new(RwLock::new(Vec::new())),
            failing_videos: Arc::new(RwLock::new(HashSet::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Make every add of `video_id` fail.
    pub async fn fail_video(&self, video_id: &str) {
        self.failing_videos
            .write()
            .await
            .insert(video_id.to_string());
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: PlaylistError) {
        *self.next_error.write().await = Some(error);
    }

    /// Playlists created so far.
    pub async fn created_playlists(&self) -> Vec<NewPlaylist> {
        self.created.read().await.clone()
    }

    /// Every add attempt, successful or not.
    pub async fn recorded_adds(&self) -> Vec<RecordedAdd> {
        self.adds.read().await.clone()
    }

    /// Video IDs successfully added, in order.
    pub async fn added_videos(&self) -> Vec<String> {
        self.adds
            .read()
            .await
            .iter()
            .filter(|a| a.success)
            .map(|a| a.video_id.clone())
            .collect()
    }

    /// Number of add attempts.
    pub async fn add_count(&self) -> usize {
        self.adds.read().await.len()
    }
}

#[async_trait]
impl PlaylistSink for MockPlaylistSink {
    fn name(&self) -> &str {
        "mock"
    }

    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<String, PlaylistError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let mut created = self.created.write().await;
        created.push(playlist.clone());
        Ok(format!("mock-playlist-{}", created.len()))
    }

    async fn add_video(&self, playlist_id: &str, video_id: &str) -> Result<(), PlaylistError> {
        let error = match self.next_error.write().await.take() {
            Some(err) => Some(err),
            None if self.failing_videos.read().await.contains(video_id) => {
                Some(PlaylistError::ApiError {
                    status: 404,
                    message: format!("Video not found: {}", video_id),
                })
            }
            None => None,
        };

        self.adds.write().await.push(RecordedAdd {
            playlist_id: playlist_id.to_string(),
            video_id: video_id.to_string(),
            success: error.is_none(),
        });

        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
