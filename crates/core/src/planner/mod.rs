//! Query planning for song entries.
//!
//! Generates an ordered list of search strings with decreasing specificity.
//! Pure and offline; no quota is involved here.

use std::collections::HashSet;

use crate::setlist::SongEntry;

/// Upper bound on queries per song.
pub const DEFAULT_MAX_QUERIES: usize = 5;

/// Configuration for the query planner.
#[derive(Debug, Clone)]
pub struct QueryPlannerConfig {
    /// Maximum number of queries to generate.
    pub max_queries: usize,
    /// Suffix for the last-resort query.
    pub fallback_suffix: String,
}

impl Default for QueryPlannerConfig {
    fn default() -> Self {
        Self {
            max_queries: DEFAULT_MAX_QUERIES,
            fallback_suffix: "official".to_string(),
        }
    }
}

/// Template-based query planner.
///
/// Covers are searched under the original artist first, then under the
/// performing artist. Every plan ends with `"{title} official"`.
#[derive(Debug, Clone, Default)]
pub struct QueryPlanner {
    config: QueryPlannerConfig,
}

impl QueryPlanner {
    /// Create a planner with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a planner with custom config.
    pub fn with_config(config: QueryPlannerConfig) -> Self {
        Self { config }
    }

    /// Plan queries for one song.
    pub fn plan(&self, song: &SongEntry) -> Vec<String> {
        let title = collapse_whitespace(&song.title);
        let performer = collapse_whitespace(&song.performing_artist);
        let mut queries = Vec::new();

        match song.cover_of().map(collapse_whitespace) {
            Some(original) => {
                queries.push(format!("{} {}", title, original));
                queries.push(format!("{} - {}", title, original));
                queries.push(format!("{} {}", title, performer));
            }
            None => {
                queries.push(format!("{} {}", title, performer));
                queries.push(format!("{} - {}", title, performer));
            }
        }

        queries.push(format!("{} {}", title, self.config.fallback_suffix));

        // Deduplicate (case-insensitive, first wins) and limit
        let mut seen = HashSet::new();
        queries
            .into_iter()
            .map(|q| collapse_whitespace(&q))
            .filter(|q| !q.is_empty())
            .filter(|q| seen.insert(q.to_lowercase()))
            .take(self.config.max_queries)
            .collect()
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
