//! Quota ledger.
//!
//! Tracks units consumed against the daily budget and answers admission
//! checks before any costly call. Charging is advisory: the ledger never
//! refuses a charge, callers are expected to ask `can_afford` first.

mod journal;
mod types;

pub use journal::UsageJournal;
pub use types::*;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::config::QuotaConfig;

/// Running counter of consumed units.
#[derive(Debug)]
pub struct QuotaLedger {
    limits: QuotaLimits,
    used: AtomicU64,
    journal: Option<(UsageJournal, NaiveDate)>,
}

impl QuotaLedger {
    /// Create a ledger starting at zero, with no journal.
    pub fn new(limits: QuotaLimits) -> Self {
        Self {
            limits,
            used: AtomicU64::new(0),
            journal: None,
        }
    }

    /// Create a ledger from configuration, resuming today's journal if enabled.
    pub fn from_config(config: &QuotaConfig) -> Self {
        let limits = QuotaLimits::from(config);
        match config.journal_path() {
            Some(path) => Self::with_journal(limits, UsageJournal::new(path), Utc::now().date_naive()),
            None => Self::new(limits),
        }
    }

    /// Create a ledger that resumes from, and writes to, a usage journal.
    ///
    /// An unreadable journal is logged and the ledger starts at zero.
    pub fn with_journal(limits: QuotaLimits, journal: UsageJournal, today: NaiveDate) -> Self {
        let used = match journal.units_on(today) {
            Ok(units) => units,
            Err(e) => {
                warn!("Failed to read usage journal, starting at zero: {}", e);
                0
            }
        };
        debug!("Quota ledger resumed at {} units for {}", used, today);

        Self {
            limits,
            used: AtomicU64::new(used),
            journal: Some((journal, today)),
        }
    }

    /// Backing journal file, if usage is persisted.
    pub fn journal_path(&self) -> Option<&Path> {
        self.journal.as_ref().map(|(journal, _)| journal.path())
    }

    pub fn limits(&self) -> &QuotaLimits {
        &self.limits
    }

    pub fn search_cost(&self) -> u64 {
        self.limits.search_cost
    }

    pub fn playlist_add_cost(&self) -> u64 {
        self.limits.playlist_add_cost
    }

    /// Units consumed so far.
    pub fn used(&self) -> u64 {
        self.used.load(Ordering::SeqCst)
    }

    /// Units left before the hard daily limit (ignores the safety buffer).
    pub fn remaining(&self) -> u64 {
        self.limits.daily_limit.saturating_sub(self.used())
    }

    /// True iff spending `units` keeps usage strictly below `limit - buffer`.
    pub fn can_afford(&self, units: u64) -> bool {
        self.used().saturating_add(units) < self.limits.ceiling()
    }

    /// Record `units` as spent. Never refuses.
    pub fn charge(&self, units: u64) {
        let total = self.used.fetch_add(units, Ordering::SeqCst) + units;
        debug!("Charged {} units (total {})", units, total);

        if let Some((journal, date)) = &self.journal {
            let usage = DailyUsage {
                date: *date,
                units_used: total,
            };
            if let Err(e) = journal.record(&usage) {
                warn!("Failed to update usage journal: {}", e);
            }
        }
    }
}
