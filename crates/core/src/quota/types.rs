//! Types for quota accounting.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::QuotaConfig;

/// Budget limits and per-call costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaLimits {
    /// Units available per day.
    pub daily_limit: u64,
    /// Units kept in reserve; admission stops this far below the limit.
    pub safety_buffer: u64,
    /// Cost of one search call.
    pub search_cost: u64,
    /// Cost of one playlist add.
    pub playlist_add_cost: u64,
}

impl QuotaLimits {
    /// Highest usage at which admission is still possible.
    pub fn ceiling(&self) -> u64 {
        self.daily_limit.saturating_sub(self.safety_buffer)
    }

    /// Worst-case cost of resolving and adding one song (one search plus one add).
    pub fn per_song_reserve(&self) -> u64 {
        self.search_cost + self.playlist_add_cost
    }
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self::from(&QuotaConfig::default())
    }
}

impl From<&QuotaConfig> for QuotaLimits {
    fn from(config: &QuotaConfig) -> Self {
        Self {
            daily_limit: config.daily_limit,
            safety_buffer: config.safety_buffer,
            search_cost: config.search_cost,
            playlist_add_cost: config.playlist_add_cost,
        }
    }
}

/// Units recorded for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub date: NaiveDate,
    pub units_used: u64,
}

/// Errors from the usage journal.
#[derive(Debug, Error)]
pub enum QuotaError {
    #[error("Failed to access usage journal {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid usage journal: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = QuotaLimits::default();
        assert_eq!(limits.daily_limit, 10_000);
        assert_eq!(limits.safety_buffer, 500);
        assert_eq!(limits.ceiling(), 9_500);
        assert_eq!(limits.per_song_reserve(), 150);
    }

    #[test]
    fn test_ceiling_saturates() {
        let limits = QuotaLimits {
            daily_limit: 100,
            safety_buffer: 200,
            ..Default::default()
        };
        assert_eq!(limits.ceiling(), 0);
    }
}
