//! Daily usage journal.
//!
//! Remembers how many units were spent on the current UTC date so that
//! several runs on the same day share one budget.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::warn;

use super::{DailyUsage, QuotaError};
use crate::persist::write_atomic;

/// JSON file holding a single `DailyUsage` record.
#[derive(Debug, Clone)]
pub struct UsageJournal {
    path: PathBuf,
}

impl UsageJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Units already used on `date`. Another day, or no file, means zero.
    ///
    /// A corrupt journal is logged and treated as zero.
    pub fn units_on(&self, date: NaiveDate) -> Result<u64, QuotaError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(QuotaError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str::<DailyUsage>(&content) {
            Ok(usage) if usage.date == date => Ok(usage.units_used),
            Ok(_) => Ok(0),
            Err(e) => {
                warn!("Usage journal {:?} is corrupted, ignoring: {}", self.path, e);
                Ok(0)
            }
        }
    }

    /// Overwrite the journal with `usage`.
    pub fn record(&self, usage: &DailyUsage) -> Result<(), QuotaError> {
        let content = serde_json::to_string_pretty(usage)?;
        write_atomic(&self.path, &content).map_err(|source| QuotaError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}
