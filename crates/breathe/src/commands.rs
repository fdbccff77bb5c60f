//! Command handlers: a breathing session, the stats view, and reset.

use crate::render::{self, Painter};
use crate::session::{self, SessionResult, SessionRunner, SessionSettings};
use crate::stats_display;
use crate::terminal::FocusGuard;
use anyhow::{Context, Result};
use breathe_shared::{StatsEngine, StatsStore};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Run a session and record it if it completes
pub async fn breathe(settings: &SessionSettings, engine: &StatsEngine, painter: Painter) -> Result<()> {
    tracing::debug!(
        theme = settings.theme.name,
        duration_secs = settings.sequencer.duration_secs,
        cycles = settings.sequencer.cycles,
        focus = settings.focus,
        "starting session"
    );

    let guard = FocusGuard::enter(settings.focus);
    let mut runner = SessionRunner::new(io::stdout(), settings.theme, painter);
    let result = runner
        .run(settings.sequencer, rand::thread_rng(), session::ctrl_c())
        .await;

    match result? {
        SessionResult::Completed(cycles) => {
            guard.beep();
            drop(guard);

            let outcome = engine.update(cycles, today());
            let color = painter.is_color();
            let mut stdout = io::stdout();
            write!(stdout, "{}", stats_display::format_session_summary(&outcome, color))?;
            write!(stdout, "\n{}", stats_display::format_hint(color))?;
            stdout.flush().context("Failed to write summary")?;
        }
        SessionResult::Interrupted => {
            drop(guard);
            println!("\n\n{}", painter.paint(render::INTERRUPTED, owo_colors::AnsiColors::Yellow));
        }
    }

    Ok(())
}

/// Read-only stats view
pub fn stats(engine: &StatsEngine, painter: Painter) -> Result<()> {
    let outcome = engine.update(0, today());
    print!("{}", stats_display::format_stats(&outcome, painter.is_color()));
    io::stdout().flush().context("Failed to write stats")?;
    Ok(())
}

/// Delete the stats file, asking first unless `assume_yes`
pub fn reset(store: &StatsStore, assume_yes: bool) -> Result<()> {
    if !store.path().exists() {
        println!("Nothing to reset: no progress saved yet.");
        return Ok(());
    }

    if !assume_yes {
        let stdin = io::stdin();
        let confirmed = confirm(
            &mut stdin.lock(),
            &mut io::stdout(),
            "This will erase your streak, rank and breath count. Continue? [y/N] ",
        )?;
        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    match store.reset() {
        Ok(true) => println!("Progress reset. Fresh start!"),
        Ok(false) => println!("Nothing to reset: no progress saved yet."),
        Err(e) => {
            tracing::warn!(path = %store.path().display(), error = %e, "reset failed");
            println!("Could not delete {}: {}", store.path().display(), e);
        }
    }
    Ok(())
}

/// Ask a yes/no question; only "y" or "yes" confirm
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    write!(output, "{}", prompt).context("Failed to write prompt")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("Failed to read answer")?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirm_yes() {
        let mut out = Vec::new();
        assert!(confirm(&mut Cursor::new("y\n"), &mut out, "? ").unwrap());
        assert!(confirm(&mut Cursor::new(" YES \n"), &mut out, "? ").unwrap());
    }

    #[test]
    fn test_confirm_default_no() {
        let mut out = Vec::new();
        assert!(!confirm(&mut Cursor::new("\n"), &mut out, "? ").unwrap());
        assert!(!confirm(&mut Cursor::new(""), &mut out, "? ").unwrap());
        assert!(!confirm(&mut Cursor::new("nope\n"), &mut out, "? ").unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "? ? ? ");
    }

    #[test]
    fn test_reset_with_yes() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        store.save(&Default::default()).unwrap();

        reset(&store, true).unwrap();
        assert!(!store.path().exists());
    }
}
