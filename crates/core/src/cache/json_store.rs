//! JSON-file-backed video cache implementation.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use super::{CacheEntry, CacheError, CacheKey, CacheStats, VideoCache};
use crate::persist::write_atomic;

type EntryMap = BTreeMap<CacheKey, CacheEntry>;

/// Video cache persisted as a single pretty-printed JSON object.
///
/// The whole map is rewritten on every mutation. Writes go to a sibling
/// `.tmp` file which is then renamed over the cache file.
pub struct JsonVideoCache {
    path: Option<PathBuf>,
    freshness: Duration,
    entries: Mutex<EntryMap>,
}

impl JsonVideoCache {
    /// Default freshness window.
    pub const DEFAULT_FRESHNESS_DAYS: u32 = 7;

    /// Open the cache at `path`, loading any existing entries.
    ///
    /// A missing or unreadable file yields an empty cache.
    pub fn open(path: impl Into<PathBuf>, freshness_days: u32) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        info!("Video cache loaded from {:?} ({} entries)", path, entries.len());

        Self {
            path: Some(path),
            freshness: Duration::days(i64::from(freshness_days)),
            entries: Mutex::new(entries),
        }
    }

    /// Create a cache that never touches the file system (useful for testing).
    pub fn in_memory() -> Self {
        Self {
            path: None,
            freshness: Duration::days(i64::from(Self::DEFAULT_FRESHNESS_DAYS)),
            entries: Mutex::new(EntryMap::new()),
        }
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn load(path: &Path) -> EntryMap {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return EntryMap::new(),
            Err(e) => {
                warn!("Failed to read video cache {:?}, starting empty: {}", path, e);
                return EntryMap::new();
            }
        };

        let raw: BTreeMap<CacheKey, serde_json::Value> = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Video cache {:?} is corrupted, starting empty: {}", path, e);
                return EntryMap::new();
            }
        };

        // A bad entry only costs itself
        raw.into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<CacheEntry>(value) {
                Ok(entry) => Some((key, entry)),
                Err(e) => {
                    warn!("Dropping unreadable cache entry '{}': {}", key, e);
                    None
                }
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, EntryMap> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, entries: &EntryMap) -> Result<(), CacheError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(entries)?;
        write_atomic(path, &content).map_err(|source| CacheError::Write {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }
}

impl VideoCache for JsonVideoCache {
    fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        let mut entries = self.lock();
        let entry = entries.get(key)?;

        if !entry.is_expired(Utc::now(), self.freshness) {
            return Some(entry.clone());
        }

        debug!("Cache entry for '{}' expired, removing", key);
        entries.remove(key);
        if let Err(e) = self.persist(&entries) {
            warn!("Failed to persist removal of expired entry '{}': {}", key, e);
        }
        None
    }

    fn store(&self, key: &CacheKey, entry: CacheEntry) -> Result<(), CacheError> {
        let mut entries = self.lock();
        entries.insert(key.clone(), entry);
        self.persist(&entries)
    }

    fn purge_expired(&self) -> Result<usize, CacheError> {
        let mut entries = self.lock();
        let now = Utc::now();
        let before = entries.len();

        entries.retain(|_, entry| !entry.is_expired(now, self.freshness));

        let removed = before - entries.len();
        if removed > 0 {
            info!("Purged {} expired cache entries", removed);
            self.persist(&entries)?;
        }
        Ok(removed)
    }

    fn clear(&self) -> Result<(), CacheError> {
        let mut entries = self.lock();
        entries.clear();
        self.persist(&entries)
    }

    fn stats(&self) -> CacheStats {
        let entries = self.lock();
        let now = Utc::now();
        let day = Duration::days(1);

        CacheStats {
            total_entries: entries.len(),
            recent_entries: entries.values().filter(|e| e.age(now) < day).count(),
            file_size_bytes: self
                .path
                .as_ref()
                .and_then(|p| fs::metadata(p).ok())
                .map(|m| m.len())
                .unwrap_or(0),
        }
    }
}
