//! Logging setup for breathe
//!
//! Logs go to stderr at `warn` by default so they never interleave with
//! the animation. `$BREATHE_LOG` takes an `EnvFilter` directive
//! (e.g. `BREATHE_LOG=breathe_shared=debug`); `--verbose` means `debug`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "BREATHE_LOG";

/// Filter used when neither the environment nor `--verbose` says otherwise
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Build the filter: `--verbose` wins, then `$BREATHE_LOG`, then the default
pub fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(default_directive(true));
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
