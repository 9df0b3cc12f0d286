//! Mock searcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::searcher::{SearchError, VideoCandidate, VideoSearcher};

/// A recorded search for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// The query that was searched.
    pub query: String,
    /// The requested result count.
    pub max_results: u32,
}

/// A query handler that produces results dynamically based on the query.
type QueryHandler = Box<dyn Fn(&str) -> Option<VideoCandidate> + Send + Sync>;

/// Mock implementation of the VideoSearcher trait.
///
/// Provides controllable behavior for testing:
/// - Return a configured video per query (case-insensitive)
/// - Track every query for assertions, including failed ones
/// - Simulate failures for the next call or for a specific query
///
/// # Example
///
/// ```rust,ignore
/// use setlist2tube_core::testing::{MockSearcher, fixtures};
///
/// let searcher = MockSearcher::new();
/// searcher.set_result("Creep Radiohead", fixtures::video("XFkzRNyygfk", "Creep")).await;
///
/// let top = searcher.search("creep radiohead", 5).await?;
/// assert_eq!(top.unwrap().video_id, "XFkzRNyygfk");
/// assert_eq!(searcher.search_count().await, 1);
/// ```
pub struct MockSearcher {
    /// Configured results keyed by lowercased query.
    results: Arc<RwLock<HashMap<String, VideoCandidate>>>,
    /// Recorded searches.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
    /// One-shot failures keyed by lowercased query.
    query_errors: Arc<RwLock<HashMap<String, SearchError>>>,
    /// Query handler consulted when no configured result matches.
    query_handler: Arc<RwLock<Option<QueryHandler>>>,
}

impl std::fmt::Debug for MockSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSearcher")
            .field("results", &"<results>")
            .field("searches", &"<searches>")
            .field("next_error", &"<next_error>")
            .field("query_errors", &"<query_errors>")
            .field("query_handler", &"<handler>")
            .finish()
    }
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearcher {
    /// Create a mock searcher that finds nothing.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(HashMap::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            query_errors: Arc::new(RwLock::new(HashMap::new())),
            query_handler: Arc::new(RwLock::new(None)),
        }
    }

    /// Return `candidate` whenever `query` is searched.
    pub async fn set_result(&self, query: &str, candidate: VideoCandidate) {
        self.results
            .write()
            .await
            .insert(query.to_lowercase(), candidate);
    }

    /// Fail the next search for `query` with `error`.
    pub async fn fail_query(&self, query: &str, error: SearchError) {
        self.query_errors
            .write()
            .await
            .insert(query.to_lowercase(), error);
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set a handler that produces results for queries with no configured result.
    pub async fn set_query_handler<F>(&self, handler: F)
    where
        F: Fn(&str) -> Option<VideoCandidate> + Send + Sync + 'static,
    {
        *self.query_handler.write().await = Some(Box::new(handler));
    }

    /// Get recorded searches.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Get the recorded query strings, in order.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.searches
            .read()
            .await
            .iter()
            .map(|s| s.query.clone())
            .collect()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Clear recorded searches.
    pub async fn clear_recorded(&self) {
        self.searches.write().await.clear();
    }
}

#[async_trait]
impl VideoSearcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Option<VideoCandidate>, SearchError> {
        // Every call is recorded; a real provider charges for failures too
        self.searches.write().await.push(RecordedSearch {
            query: query.to_string(),
            max_results,
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let key = query.to_lowercase();
        if let Some(err) = self.query_errors.write().await.remove(&key) {
            return Err(err);
        }

        if let Some(candidate) = self.results.read().await.get(&key) {
            return Ok(Some(candidate.clone()));
        }

        let handler = self.query_handler.read().await;
        Ok(handler.as_ref().and_then(|h| h(query)))
    }
}
