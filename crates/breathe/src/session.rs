//! Session runner: shows sequencer frames with real delays.
//!
//! The runner owns the only suspension points of a session, the waits
//! between frames. Each wait races an interrupt future; if the interrupt
//! wins, the run is abandoned and reported as [`SessionResult::Interrupted`]
//! so the caller can skip the stats update.

use crate::cli::Cli;
use crate::config::BreatheConfig;
use crate::render::{self, Painter};
use anyhow::{Context, Result};
use breathe_shared::affirmations::AFFIRMATIONS;
use breathe_shared::{Sequencer, SequencerConfig, Theme};
use crossterm::{cursor, queue, terminal};
use rand::Rng;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

/// Accepted phase durations, in seconds
pub const DURATION_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

/// Accepted cycle counts
pub const CYCLES_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Pause on the intro screen before the first frame
pub const INTRO_PAUSE: Duration = Duration::from_secs(2);

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionResult {
    /// All cycles shown
    Completed(u32),
    /// Abandoned by the user; earns nothing
    Interrupted,
}

/// Resolved session parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub theme: Theme,
    pub sequencer: SequencerConfig,
    pub focus: bool,
}

impl SessionSettings {
    /// Merge CLI flags over the config file. Out-of-range numbers and
    /// unknown themes fall back instead of failing.
    pub fn resolve<R: Rng + ?Sized>(cli: &Cli, config: &BreatheConfig, rng: &mut R) -> Self {
        let theme = if cli.random {
            Theme::random(rng)
        } else {
            Theme::lookup(cli.theme.as_deref().unwrap_or(&config.session.theme))
        };

        let fallback_duration = in_range_or(
            config.session.duration_secs,
            &DURATION_RANGE,
            SequencerConfig::default().duration_secs,
            "config duration_secs",
        );
        let duration_secs = cli.duration.map_or(fallback_duration, |d| {
            in_range_or(d, &DURATION_RANGE, fallback_duration, "--duration")
        });

        let fallback_cycles = in_range_or(
            config.session.cycles,
            &CYCLES_RANGE,
            SequencerConfig::default().cycles,
            "config cycles",
        );
        let cycles = cli.cycles.map_or(fallback_cycles, |c| {
            in_range_or(c, &CYCLES_RANGE, fallback_cycles, "--cycles")
        });

        Self {
            theme,
            sequencer: SequencerConfig::new(duration_secs, cycles),
            focus: cli.focus || config.session.focus,
        }
    }
}

fn in_range_or(value: u32, range: &std::ops::RangeInclusive<u32>, fallback: u32, what: &str) -> u32 {
    if range.contains(&value) {
        value
    } else {
        tracing::warn!(value, fallback, "{} out of range, using fallback", what);
        fallback
    }
}

/// Draws frames to `out` and waits between them
pub struct SessionRunner<W> {
    out: W,
    theme: Theme,
    painter: Painter,
    intro_pause: Duration,
}

impl<W: Write> SessionRunner<W> {
    pub fn new(out: W, theme: Theme, painter: Painter) -> Self {
        Self {
            out,
            theme,
            painter,
            intro_pause: INTRO_PAUSE,
        }
    }

    pub fn with_intro_pause(mut self, pause: Duration) -> Self {
        self.intro_pause = pause;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run the whole session, or stop early when `interrupt` resolves
    pub async fn run<R, F>(&mut self, config: SequencerConfig, rng: R, interrupt: F) -> Result<SessionResult>
    where
        R: Rng,
        F: Future<Output = ()>,
    {
        tokio::pin!(interrupt);

        self.show(&render::render_intro(self.painter))?;
        tokio::select! {
            _ = tokio::time::sleep(self.intro_pause) => {}
            _ = &mut interrupt => return Ok(self.abandon(0)),
        }

        let mut sequencer = Sequencer::new(config, AFFIRMATIONS, rng);
        let mut shown = 0usize;
        for frame in sequencer.by_ref() {
            self.show(&render::render_frame(&frame, &self.theme, self.painter))?;
            shown += 1;
            tokio::select! {
                _ = tokio::time::sleep(frame.interval) => {}
                _ = &mut interrupt => return Ok(self.abandon(shown)),
            }
        }

        let cycles = sequencer.finish().unwrap_or(0);
        self.show(&render::render_outro(self.painter))?;
        tracing::debug!(cycles, frames = shown, "session complete");
        Ok(SessionResult::Completed(cycles))
    }

    fn abandon(&self, frames_shown: usize) -> SessionResult {
        tracing::info!(frames_shown, "session interrupted");
        SessionResult::Interrupted
    }

    /// Clear the screen and draw `text`
    fn show(&mut self, text: &str) -> Result<()> {
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
        .context("Failed to clear terminal")?;
        self.out
            .write_all(text.as_bytes())
            .context("Failed to write frame")?;
        self.out.flush().context("Failed to flush terminal")?;
        Ok(())
    }
}

/// Resolves on the first Ctrl-C. If the handler cannot be installed it
/// never resolves, and the session simply cannot be interrupted.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
