//! Match outcome types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::searcher::watch_url;

/// A resolved video for a song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMatch {
    pub video_id: String,
    pub title: String,
    pub channel_name: String,
    /// The query that produced the match (the original query for cache hits).
    pub query: String,
    /// True when served from the cache without any search call.
    pub from_cache: bool,
}

impl VideoMatch {
    pub fn watch_url(&self) -> String {
        watch_url(&self.video_id)
    }
}

/// Why a song was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The quota ledger refused admission.
    QuotaExhausted,
    /// The run was interrupted before reaching this song.
    Cancelled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuotaExhausted => f.write_str("quota exhausted"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Outcome of resolving one song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    Found(VideoMatch),
    NotFound,
    Skipped { reason: SkipReason },
}

impl MatchResult {
    pub fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn video(&self) -> Option<&VideoMatch> {
        match self {
            Self::Found(video) => Some(video),
            _ => None,
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video().map(|v| v.video_id.as_str())
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped { reason } => Some(*reason),
            _ => None,
        }
    }
}
