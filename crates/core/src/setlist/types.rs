//! Types for setlists and the songs in them.

use serde::{Deserialize, Serialize};

/// A song as performed at a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongEntry {
    /// Song title.
    pub title: String,
    /// Artist performing the show.
    pub performing_artist: String,
    /// Whether the song is a cover.
    #[serde(default)]
    pub is_cover: bool,
    /// Original artist, when the song is a cover and it is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_artist: Option<String>,
}

impl SongEntry {
    /// An original song by the performing artist.
    pub fn new(title: impl Into<String>, performing_artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            performing_artist: performing_artist.into(),
            is_cover: false,
            original_artist: None,
        }
    }

    /// A cover of `original_artist`'s song.
    pub fn cover(
        title: impl Into<String>,
        performing_artist: impl Into<String>,
        original_artist: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            performing_artist: performing_artist.into(),
            is_cover: true,
            original_artist: Some(original_artist.into()),
        }
    }

    /// Original artist if this is a cover with a non-blank original artist.
    pub fn cover_of(&self) -> Option<&str> {
        if !self.is_cover {
            return None;
        }
        self.original_artist
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// Artist to show next to the title: the original artist for covers.
    pub fn display_artist(&self) -> &str {
        self.cover_of().unwrap_or(&self.performing_artist)
    }
}

/// A fetched setlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetlistInfo {
    pub artist: String,
    pub venue: String,
    /// "City, State" or "City, Country".
    pub city: String,
    /// Event date as reported by the source (setlist.fm uses dd-MM-yyyy).
    pub date: String,
    /// Page the setlist was requested from.
    pub url: String,
    /// Songs in performance order, taped intros/outros excluded.
    pub songs: Vec<SongEntry>,
}

impl SetlistInfo {
    /// Title for a playlist built from this setlist.
    pub fn playlist_title(&self) -> String {
        format!("{} - {} ({})", self.artist, self.venue, self.date)
    }

    /// Description for a playlist built from this setlist.
    pub fn playlist_description(&self) -> String {
        format!(
            "Setlist from {} at {}, {} on {}\n\nGenerated from: {}\nSource: setlist.fm\nTotal tracks: {}",
            self.artist,
            self.venue,
            self.city,
            self.date,
            self.url,
            self.songs.len()
        )
    }
}
