//! Playlist sink abstraction.
//!
//! A `PlaylistSink` creates the target playlist and appends videos to it.
//! Adds cost quota and may fail independently of search.

mod types;
mod youtube;

pub use types::*;
pub use youtube::YouTubePlaylistSink;
