//! Types for the run coordinator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::VideoCache;
use crate::matcher::{MatchResult, SkipReason};
use crate::playlist::PlaylistError;
use crate::quota::QuotaLedger;
use crate::setlist::{SetlistError, SongEntry};

/// Errors that abort a run before it starts.
#[derive(Debug, Error)]
pub enum RunError {
    /// The setlist contained no playable songs.
    #[error("setlist has no songs")]
    EmptySetlist,

    /// Setlist fetch failed.
    #[error("setlist error: {0}")]
    Setlist(#[from] SetlistError),

    /// Target playlist could not be created.
    #[error("failed to create playlist: {0}")]
    PlaylistCreation(#[from] PlaylistError),
}

/// Result of adding a found video to the playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    Failed { reason: String },
    /// Not enough quota left for the add.
    SkippedQuota,
}

/// Per-song record in a run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongReport {
    /// Zero-based position in the setlist.
    pub index: usize,
    pub song: SongEntry,
    pub result: MatchResult,
    /// `None` in preview mode or when nothing was found.
    pub add: Option<AddOutcome>,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub songs: Vec<SongReport>,
    /// Ledger usage at the end of the run.
    pub units_used: u64,
    /// The ledger stopped the run before the last song.
    pub halted: bool,
    /// The stop flag was raised during the run.
    pub cancelled: bool,
}

impl RunReport {
    pub fn found_count(&self) -> usize {
        self.songs.iter().filter(|s| s.result.is_found()).count()
    }

    pub fn not_found_count(&self) -> usize {
        self.songs
            .iter()
            .filter(|s| matches!(s.result, MatchResult::NotFound))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.songs
            .iter()
            .filter(|s| s.result.skip_reason().is_some())
            .count()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.songs
            .iter()
            .filter(|s| s.result.skip_reason() == Some(reason))
            .count()
    }

    pub fn added_count(&self) -> usize {
        self.songs
            .iter()
            .filter(|s| matches!(s.add, Some(AddOutcome::Added)))
            .count()
    }

    pub fn failed_add_count(&self) -> usize {
        self.songs
            .iter()
            .filter(|s| matches!(s.add, Some(AddOutcome::Failed { .. })))
            .count()
    }

    /// Songs the engine searched for without success.
    pub fn not_found(&self) -> impl Iterator<Item = &SongEntry> {
        self.songs
            .iter()
            .filter(|s| matches!(s.result, MatchResult::NotFound))
            .map(|s| &s.song)
    }
}

/// Progress snapshot passed to the callback after each song.
#[derive(Debug, Clone)]
pub struct RunProgress<'a> {
    /// Zero-based position of the song just processed.
    pub index: usize,
    pub total: usize,
    pub song: &'a SongEntry,
    pub result: &'a MatchResult,
    pub add: Option<&'a AddOutcome>,
    pub units_used: u64,
}

/// Quota and cache status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaStatus {
    pub units_used: u64,
    pub estimated_remaining: u64,
    pub daily_limit: u64,
    pub cache_entry_count: usize,
    pub recent_cache_entry_count: usize,
    pub cache_file_size_bytes: u64,
}

impl QuotaStatus {
    /// Snapshot the ledger and cache.
    pub fn collect(ledger: &QuotaLedger, cache: &dyn VideoCache) -> Self {
        let stats = cache.stats();
        Self {
            units_used: ledger.used(),
            estimated_remaining: ledger.remaining(),
            daily_limit: ledger.limits().daily_limit,
            cache_entry_count: stats.total_entries,
            recent_cache_entry_count: stats.recent_entries,
            cache_file_size_bytes: stats.file_size_bytes,
        }
    }
}

/// Worst-case cost estimate for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEstimate {
    pub song_count: usize,
    /// One search and one add per song.
    pub worst_case_units: u64,
    pub units_used: u64,
    /// Whether the worst case stays under the admission ceiling.
    pub affordable: bool,
}
