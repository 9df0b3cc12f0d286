//! Mock setlist source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::setlist::{SetlistError, SetlistInfo, SetlistSource};

/// Mock implementation of the SetlistSource trait.
///
/// Returns the configured setlist for any URL, or `NotFound` when none is set.
#[derive(Debug)]
pub struct MockSetlistSource {
    setlist: Arc<RwLock<Option<SetlistInfo>>>,
    /// URLs requested, in order.
    fetched: Arc<RwLock<Vec<String>>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<SetlistError>>>,
}

impl Default for MockSetlistSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSetlistSource {
    pub fn new() -> Self {
        Self {
            setlist: Arc::new(RwLock::new(None)),
            fetched: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the setlist returned by subsequent fetches.
    pub async fn set_setlist(&self, setlist: SetlistInfo) {
        *self.setlist.write().await = Some(setlist);
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: SetlistError) {
        *self.next_error.write().await = Some(error);
    }

    /// URLs fetched so far.
    pub async fn fetched_urls(&self) -> Vec<String> {
        self.fetched.read().await.clone()
    }
}

#[async_trait]
impl SetlistSource for MockSetlistSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, url: &str) -> Result<SetlistInfo, SetlistError> {
        self.fetched.write().await.push(url.to_string());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.setlist
            .read()
            .await
            .clone()
            .ok_or_else(|| SetlistError::NotFound(url.to_string()))
    }
}
