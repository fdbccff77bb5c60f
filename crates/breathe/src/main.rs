//! breathe - box breathing in your terminal
//!
//! Runs a guided inhale/hold/exhale/hold session and keeps a small
//! record of progress: total breaths, daily streak, and rank.

use anyhow::Result;
use breathe::cli::Cli;
use breathe::commands;
use breathe::config::BreatheConfig;
use breathe::logging;
use breathe::render::Painter;
use breathe::session::SessionSettings;
use breathe_shared::stats_store;
use breathe_shared::{StatsEngine, StatsStore};

/// Used when neither the executable's directory nor a data directory can be used
const LAST_RESORT_STATS_FILE: &str = "breathe-stats.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_args(std::env::args());
    logging::init(cli.verbose);
    for arg in &cli.ignored {
        tracing::warn!(arg = %arg, "ignoring unrecognized argument");
    }

    let config = BreatheConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring config file");
        BreatheConfig::default()
    });

    let store = resolve_store(&cli, &config);
    tracing::debug!(path = %store.path().display(), "stats file");
    let painter = Painter::detect();

    if cli.reset {
        return commands::reset(&store, cli.yes);
    }

    let engine = StatsEngine::new(store);
    if cli.stats {
        return commands::stats(&engine, painter);
    }

    let settings = SessionSettings::resolve(&cli, &config, &mut rand::thread_rng());
    commands::breathe(&settings, &engine, painter).await
}

/// `--stats-file`, then `$BREATHE_STATS_FILE`, then the config file, then
/// beside the executable, then the data dir
fn resolve_store(cli: &Cli, config: &BreatheConfig) -> StatsStore {
    let explicit = cli
        .stats_file
        .clone()
        .or_else(stats_store::env_override)
        .or_else(|| config.storage.stats_file.clone());
    if let Some(path) = explicit {
        return StatsStore::new(path);
    }
    StatsStore::default_location().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to {}", LAST_RESORT_STATS_FILE);
        StatsStore::new(LAST_RESORT_STATS_FILE)
    })
}
