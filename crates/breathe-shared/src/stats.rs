//! Stats engine: the read-modify-write around a completed session.
//!
//! `update` never fails. Storage problems degrade to a default record
//! with an `Unavailable` next level so the caller can still show something.

use crate::error::StatsError;
use crate::progress::ProgressRecord;
use crate::rank::{level_progress, next_rank, MAX_LEVEL};
use crate::stats_store::StatsStore;
use chrono::NaiveDate;

/// Next-level name reported when the stats file could not be used
pub const UNAVAILABLE: &str = "Unavailable";

/// Result of one stats update
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// Record after the update
    pub record: ProgressRecord,
    /// Breaths credited by this update
    pub breaths_earned: u64,
    /// Rank changed during this update
    pub level_up: bool,
    /// Name of the next tier, `Max Level` at the top, `Unavailable` on storage failure
    pub next_level_name: String,
    /// Threshold of the next tier (current total at the top)
    pub next_level_goal: u64,
}

impl SessionOutcome {
    fn new(record: ProgressRecord, breaths_earned: u64, level_up: bool) -> Self {
        let (next_level_name, next_level_goal) = match next_rank(record.total_breaths) {
            Some(next) => (next.name.to_string(), next.threshold),
            None => (MAX_LEVEL.to_string(), record.total_breaths),
        };
        Self {
            record,
            breaths_earned,
            level_up,
            next_level_name,
            next_level_goal,
        }
    }

    fn degraded() -> Self {
        Self {
            record: ProgressRecord::default(),
            breaths_earned: 0,
            level_up: false,
            next_level_name: UNAVAILABLE.to_string(),
            next_level_goal: 0,
        }
    }

    /// True when the stats file could not be read or written
    pub fn is_degraded(&self) -> bool {
        self.next_level_name == UNAVAILABLE
    }

    pub fn is_max_level(&self) -> bool {
        self.next_level_name == MAX_LEVEL
    }

    /// Breaths still needed for the next tier
    pub fn breaths_to_next(&self) -> u64 {
        self.next_level_goal.saturating_sub(self.record.total_breaths)
    }

    /// Fraction of the way to the next tier (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        if self.is_degraded() {
            return 0.0;
        }
        level_progress(self.record.total_breaths)
    }
}

/// Owns the store and applies sessions to it
pub struct StatsEngine {
    store: StatsStore,
}

impl StatsEngine {
    pub fn new(store: StatsStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StatsStore {
        &self.store
    }

    /// Credit `cycles_completed` cycles on `today` and persist.
    ///
    /// `update(0, today)` is the read-only view: nothing is mutated or written.
    pub fn update(&self, cycles_completed: u32, today: NaiveDate) -> SessionOutcome {
        match self.try_update(cycles_completed, today) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    path = %self.store.path().display(),
                    kind = e.kind(),
                    error = %e,
                    "stats unavailable"
                );
                SessionOutcome::degraded()
            }
        }
    }

    fn try_update(&self, cycles_completed: u32, today: NaiveDate) -> Result<SessionOutcome, StatsError> {
        let mut record = self.store.load()?;
        let (earned, level_up) = record.apply_session(cycles_completed, today);

        if earned > 0 {
            self.store.save(&record)?;
            tracing::info!(
                earned,
                total = record.total_breaths,
                streak = record.streak,
                rank = %record.rank,
                level_up,
                "session recorded"
            );
        }

        Ok(SessionOutcome::new(record, earned, level_up))
    }
}
