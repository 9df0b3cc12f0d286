//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the collaborator traits
//! (search, playlist, setlist) so runs can be tested without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use setlist2tube_core::testing::{fixtures, MockPlaylistSink, MockSearcher};
//!
//! let searcher = MockSearcher::new();
//! let sink = MockPlaylistSink::new();
//!
//! searcher.set_result("Creep Radiohead", fixtures::video("XFkzRNyygfk", "Creep")).await;
//! sink.fail_video("XFkzRNyygfk").await;
//! ```

mod mock_playlist_sink;
mod mock_searcher;
mod mock_setlist_source;

pub use mock_playlist_sink::{MockPlaylistSink, RecordedAdd};
pub use mock_searcher::{MockSearcher, RecordedSearch};
pub use mock_setlist_source::MockSetlistSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{Duration, Utc};

    use crate::cache::CacheEntry;
    use crate::searcher::VideoCandidate;
    use crate::setlist::{SetlistInfo, SongEntry};

    /// A well-formed setlist.fm URL.
    pub const SETLIST_URL: &str =
        "https://www.setlist.fm/setlist/radiohead/2018/madison-square-garden-new-york-ny-63e2a6a3.html";

    /// Create a search result.
    pub fn video(video_id: &str, title: &str) -> VideoCandidate {
        VideoCandidate {
            video_id: video_id.to_string(),
            title: title.to_string(),
            channel_name: "MockChannel".to_string(),
        }
    }

    /// Create a fresh cache entry.
    pub fn cache_entry(video_id: &str, query: &str) -> CacheEntry {
        cache_entry_aged(video_id, query, Duration::zero())
    }

    /// Create a cache entry written `age` ago.
    pub fn cache_entry_aged(video_id: &str, query: &str, age: Duration) -> CacheEntry {
        CacheEntry {
            video_id: video_id.to_string(),
            title: format!("{} (Official Video)", query),
            channel_name: "MockChannel".to_string(),
            created_at: Utc::now() - age,
            source_query: query.to_string(),
        }
    }

    /// Create original songs by one artist.
    pub fn songs(titles: &[&str], artist: &str) -> Vec<SongEntry> {
        titles.iter().map(|t| SongEntry::new(*t, artist)).collect()
    }

    /// Create a setlist with placeholder venue details.
    pub fn setlist(artist: &str, songs: Vec<SongEntry>) -> SetlistInfo {
        SetlistInfo {
            artist: artist.to_string(),
            venue: "Madison Square Garden".to_string(),
            city: "New York, NY".to_string(),
            date: "26-07-2018".to_string(),
            url: SETLIST_URL.to_string(),
            songs,
        }
    }
}
