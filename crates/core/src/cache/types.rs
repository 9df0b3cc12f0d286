//! Types for the video cache (search result cache).

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::setlist::SongEntry;

/// Lookup key for a song: lowercased, trimmed `title|artist`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(title: &str, artist: &str) -> Self {
        Self(format!(
            "{}|{}",
            title.trim().to_lowercase(),
            artist.trim().to_lowercase()
        ))
    }

    /// Key for a song, always keyed on the performing artist.
    pub fn for_song(song: &SongEntry) -> Self {
        Self::new(&song.title, &song.performing_artist)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cached search result.
///
/// Field names on disk match the historical `video_cache.json` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Video ID of the match.
    pub video_id: String,
    /// Video title as reported by the provider.
    pub title: String,
    /// Uploading channel.
    #[serde(rename = "channel")]
    pub channel_name: String,
    /// When the entry was written. Timestamps without an offset are read as UTC.
    #[serde(rename = "timestamp", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    /// The query that produced the match.
    #[serde(rename = "search_query")]
    pub source_query: String,
}

impl CacheEntry {
    /// Age of the entry relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.created_at)
    }

    /// Whether the entry has reached the end of its freshness window.
    pub fn is_expired(&self, now: DateTime<Utc>, freshness: Duration) -> bool {
        self.age(now) >= freshness
    }
}

/// Parse an RFC 3339 timestamp, or an offset-less ISO 8601 one taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Entries currently held (stale ones included until touched or purged).
    pub total_entries: usize,
    /// Entries written within the last 24 hours.
    pub recent_entries: usize,
    /// Size of the cache file, 0 when absent or in-memory.
    pub file_size_bytes: u64,
}

/// Errors for cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to write cache file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_case_and_whitespace_insensitive() {
        let a = CacheKey::new("Hallelujah", "Jeff Buckley");
        let b = CacheKey::new("  hallelujah ", "JEFF BUCKLEY\t");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "hallelujah|jeff buckley");
    }

    #[test]
    fn test_cache_key_keeps_title_and_artist_apart() {
        assert_ne!(CacheKey::new("a b", "c"), CacheKey::new("a", "b c"));
    }

    #[test]
    fn test_entry_expiry_boundary() {
        let now = Utc::now();
        let freshness = Duration::days(7);
        let entry = |age: Duration| CacheEntry {
            video_id: "vid".to_string(),
            title: "t".to_string(),
            channel_name: "c".to_string(),
            created_at: now - age,
            source_query: "q".to_string(),
        };

        assert!(!entry(Duration::days(6) + Duration::hours(23)).is_expired(now, freshness));
        assert!(entry(Duration::days(7)).is_expired(now, freshness));
        assert!(entry(Duration::days(7) + Duration::hours(1)).is_expired(now, freshness));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T12:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-05-01T12:30:00.250000"),
            Some(expected + Duration::milliseconds(250))
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_cache_entry_uses_legacy_field_names() {
        let entry = CacheEntry {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: "Some Video".to_string(),
            channel_name: "Some Channel".to_string(),
            created_at: Utc::now(),
            source_query: "song artist".to_string(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["video_id"], "dQw4w9WgXcQ");
        assert_eq!(json["channel"], "Some Channel");
        assert_eq!(json["search_query"], "song artist");
        assert!(json["timestamp"].is_string());
    }
}
