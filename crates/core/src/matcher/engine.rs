//! Match engine: resolves one song to at most one video.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::{MatchResult, SkipReason, VideoMatch};
use crate::cache::{CacheEntry, CacheKey, VideoCache};
use crate::planner::QueryPlanner;
use crate::quota::QuotaLedger;
use crate::searcher::VideoSearcher;
use crate::setlist::SongEntry;

/// Default number of results the provider ranks per query.
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// Combines cache, planner, ledger and searcher.
///
/// Flow for a song:
/// 1. Cache hit returns immediately with no quota charged
/// 2. Otherwise each planned query is admitted, charged, then searched
/// 3. The first query with a result wins and is written back to the cache
pub struct MatchEngine {
    cache: Arc<dyn VideoCache>,
    planner: QueryPlanner,
    ledger: Arc<QuotaLedger>,
    searcher: Arc<dyn VideoSearcher>,
    max_results: u32,
}

impl MatchEngine {
    pub fn new(
        cache: Arc<dyn VideoCache>,
        ledger: Arc<QuotaLedger>,
        searcher: Arc<dyn VideoSearcher>,
    ) -> Self {
        Self {
            cache,
            planner: QueryPlanner::new(),
            ledger,
            searcher,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Replace the query planner.
    pub fn with_planner(mut self, planner: QueryPlanner) -> Self {
        self.planner = planner;
        self
    }

    /// Set how many results the provider ranks per query.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn cache(&self) -> &Arc<dyn VideoCache> {
        &self.cache
    }

    pub fn ledger(&self) -> &Arc<QuotaLedger> {
        &self.ledger
    }

    /// Resolve a song.
    pub async fn resolve(&self, song: &SongEntry) -> MatchResult {
        let key = CacheKey::for_song(song);

        if let Some(entry) = self.cache.lookup(&key) {
            debug!("Cache hit for '{}': {}", key, entry.video_id);
            return MatchResult::Found(VideoMatch {
                video_id: entry.video_id,
                title: entry.title,
                channel_name: entry.channel_name,
                query: entry.source_query,
                from_cache: true,
            });
        }

        let search_cost = self.ledger.search_cost();

        for query in self.planner.plan(song) {
            if !self.ledger.can_afford(search_cost) {
                info!(
                    "Quota ceiling reached at {} units, skipping '{}'",
                    self.ledger.used(),
                    song.title
                );
                return MatchResult::skipped(SkipReason::QuotaExhausted);
            }

            // Charge on attempt; failed calls are not refunded
            self.ledger.charge(search_cost);

            let candidate = match self.searcher.search(&query, self.max_results).await {
                Ok(candidate) => candidate,
                Err(e) => {
                    warn!("Search '{}' via {} failed: {}", query, self.searcher.name(), e);
                    None
                }
            };

            let Some(candidate) = candidate else {
                debug!("No result for '{}'", query);
                continue;
            };

            info!("Matched '{}' -> {} ({})", song.title, candidate.video_id, query);

            let entry = CacheEntry {
                video_id: candidate.video_id.clone(),
                title: candidate.title.clone(),
                channel_name: candidate.channel_name.clone(),
                created_at: Utc::now(),
                source_query: query.clone(),
            };
            if let Err(e) = self.cache.store(&key, entry) {
                warn!("Failed to cache match for '{}': {}", key, e);
            }

            return MatchResult::Found(VideoMatch {
                video_id: candidate.video_id,
                title: candidate.title,
                channel_name: candidate.channel_name,
                query,
                from_cache: false,
            });
        }

        info!("No video found for '{}' by {}", song.title, song.performing_artist);
        MatchResult::NotFound
    }
}
