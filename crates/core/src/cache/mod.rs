//! Video cache - remembers which video matched a song.
//!
//! Every lookup consults the cache first so repeated songs (and repeated runs
//! over the same setlist) don't spend search quota. Entries expire after a
//! freshness window (7 days by default).

mod json_store;
mod types;

pub use json_store::JsonVideoCache;
pub use types::*;

/// Trait for video cache storage.
///
/// Implementations persist synchronously: when a mutating call returns, the
/// change has been flushed (or the error reported).
pub trait VideoCache: Send + Sync {
    /// Get the entry for `key`.
    ///
    /// A stale entry is removed (and the removal persisted) instead of being
    /// returned.
    fn lookup(&self, key: &CacheKey) -> Option<CacheEntry>;

    /// Insert or overwrite the entry for `key` and persist.
    ///
    /// On error the in-memory state keeps the new entry.
    fn store(&self, key: &CacheKey, entry: CacheEntry) -> Result<(), CacheError>;

    /// Remove every stale entry. Returns the number removed.
    fn purge_expired(&self) -> Result<usize, CacheError>;

    /// Remove all entries.
    fn clear(&self) -> Result<(), CacheError>;

    /// Get cache statistics.
    fn stats(&self) -> CacheStats;
}
