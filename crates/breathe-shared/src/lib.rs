//! Shared types and logic for breathe.
//!
//! Everything in here is free of terminal and timing side effects:
//! the stats engine, rank table, persisted record and its store, the
//! breathing sequencer, and the static theme/affirmation tables.

pub mod affirmations;
pub mod error;
pub mod progress;
pub mod rank;
pub mod sequencer;
pub mod stats;
pub mod stats_store;
pub mod themes;
pub mod ui;

pub use error::StatsError;
pub use progress::ProgressRecord;
pub use rank::RankLevel;
pub use sequencer::{CyclePhase, RenderFrame, Sequencer, SequencerConfig};
pub use stats::{SessionOutcome, StatsEngine};
pub use stats_store::StatsStore;
pub use themes::Theme;

/// Crate version, shared by the CLI banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Breath credits earned per completed cycle (one per phase).
pub const BREATHS_PER_CYCLE: u64 = 4;
