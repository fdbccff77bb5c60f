//! Breathing sequencer: the frame schedule for a run.
//!
//! A run is `cycles` repetitions of inhale, hold, exhale, hold. The
//! sequencer is a plain iterator of [`RenderFrame`]s; it does not sleep
//! or draw. The caller shows each frame and waits `frame.interval`
//! before pulling the next one.
//!
//! ```text
//! NotStarted -> Inhale -> HoldFull -> Exhale -> HoldEmpty -> (next cycle | Done)
//! ```

use crate::affirmations;
use rand::Rng;
use std::time::Duration;

/// Largest box edge, reached at the top of the inhale
pub const MAX_SIZE: u8 = 10;

/// Smallest box edge, held after the exhale
pub const MIN_SIZE: u8 = 1;

/// Interval between hold countdown frames
const HOLD_INTERVAL: Duration = Duration::from_secs(1);

/// Default cycles per run
pub const DEFAULT_CYCLES: u32 = 4;

/// Default seconds per phase
pub const DEFAULT_DURATION_SECS: u32 = 4;

/// One of the four phases of a breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Inhale,
    HoldFull,
    Exhale,
    HoldEmpty,
}

impl CyclePhase {
    /// 1-based step number shown in the label
    pub fn step(&self) -> u8 {
        match self {
            Self::Inhale => 1,
            Self::HoldFull => 2,
            Self::Exhale => 3,
            Self::HoldEmpty => 4,
        }
    }

    pub fn is_hold(&self) -> bool {
        matches!(self, Self::HoldFull | Self::HoldEmpty)
    }

    fn next(&self) -> Option<Self> {
        match self {
            Self::Inhale => Some(Self::HoldFull),
            Self::HoldFull => Some(Self::Exhale),
            Self::Exhale => Some(Self::HoldEmpty),
            Self::HoldEmpty => None,
        }
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inhale => write!(f, "Inhale"),
            Self::Exhale => write!(f, "Exhale"),
            Self::HoldFull | Self::HoldEmpty => write!(f, "Hold"),
        }
    }
}

/// Run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Seconds per phase
    pub duration_secs: u32,
    /// Number of full cycles
    pub cycles: u32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            cycles: DEFAULT_CYCLES,
        }
    }
}

impl SequencerConfig {
    pub fn new(duration_secs: u32, cycles: u32) -> Self {
        Self { duration_secs, cycles }
    }

    /// Interval between inhale/exhale frames: the phase duration spread over the box sizes
    pub fn breath_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_secs) * 1000 / u64::from(MAX_SIZE))
    }

    /// Frames in one full cycle
    pub fn frames_per_cycle(&self) -> usize {
        2 * usize::from(MAX_SIZE) + 2 * self.duration_secs as usize
    }

    /// Frames in the whole run
    pub fn total_frames(&self) -> usize {
        self.frames_per_cycle() * self.cycles as usize
    }

    fn phase_len(&self, phase: CyclePhase) -> u32 {
        if phase.is_hold() {
            self.duration_secs
        } else {
            u32::from(MAX_SIZE)
        }
    }
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub phase: CyclePhase,
    /// 1-based cycle number
    pub cycle: u32,
    /// Box edge length (1..=10)
    pub size: u8,
    /// Seconds left in a hold phase
    pub countdown: Option<u32>,
    /// Affirmation for the current cycle
    pub message: &'static str,
    /// How long this frame stays on screen
    pub interval: Duration,
}

impl RenderFrame {
    /// Label shown above the box, e.g. `Step 2: Hold... (3s)`
    pub fn label(&self) -> String {
        match self.countdown {
            Some(secs) => format!("Step {}: {}... ({}s)", self.phase.step(), self.phase, secs),
            None => format!("Step {}: {}...", self.phase.step(), self.phase),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    Running { cycle: u32, phase: CyclePhase, step: u32 },
    Done,
}

/// Lazy, finite frame schedule for one run. Not restartable.
pub struct Sequencer<'a, R> {
    config: SequencerConfig,
    messages: &'a [&'static str],
    rng: R,
    state: State,
    message: &'static str,
    completed: u32,
}

impl<'a, R: Rng> Sequencer<'a, R> {
    pub fn new(config: SequencerConfig, messages: &'a [&'static str], rng: R) -> Self {
        Self {
            config,
            messages,
            rng,
            state: State::NotStarted,
            message: "",
            completed: 0,
        }
    }

    /// Cycles completed, once the schedule is exhausted
    pub fn finish(&self) -> Option<u32> {
        match self.state {
            State::Done => Some(self.completed),
            _ => None,
        }
    }

    fn begin_cycle(&mut self, cycle: u32) {
        self.message = affirmations::pick(self.messages, &mut self.rng);
        self.state = State::Running {
            cycle,
            phase: CyclePhase::Inhale,
            step: 0,
        };
    }

    fn frame(&self, cycle: u32, phase: CyclePhase, step: u32) -> RenderFrame {
        let duration = self.config.duration_secs;
        // step < MAX_SIZE on the breath phases
        let offset = step as u8;
        let (size, countdown, interval) = match phase {
            CyclePhase::Inhale => (MIN_SIZE + offset, None, self.config.breath_interval()),
            CyclePhase::HoldFull => (MAX_SIZE, Some(duration - step), HOLD_INTERVAL),
            CyclePhase::Exhale => (MAX_SIZE - offset, None, self.config.breath_interval()),
            CyclePhase::HoldEmpty => (MIN_SIZE, Some(duration - step), HOLD_INTERVAL),
        };

        RenderFrame {
            phase,
            cycle,
            size,
            countdown,
            message: self.message,
            interval,
        }
    }
}

impl<'a, R: Rng> Iterator for Sequencer<'a, R> {
    type Item = RenderFrame;

    fn next(&mut self) -> Option<RenderFrame> {
        loop {
            match self.state {
                State::Done => return None,
                State::NotStarted => {
                    if self.config.cycles == 0 {
                        self.state = State::Done;
                    } else {
                        self.begin_cycle(1);
                    }
                }
                State::Running { cycle, phase, step } => {
                    if step < self.config.phase_len(phase) {
                        let frame = self.frame(cycle, phase, step);
                        self.state = State::Running {
                            cycle,
                            phase,
                            step: step + 1,
                        };
                        return Some(frame);
                    }

                    match phase.next() {
                        Some(next) => {
                            self.state = State::Running {
                                cycle,
                                phase: next,
                                step: 0,
                            }
                        }
                        None => {
                            self.completed = cycle;
                            tracing::debug!(cycle, "cycle complete");
                            if cycle < self.config.cycles {
                                self.begin_cycle(cycle + 1);
                            } else {
                                self.state = State::Done;
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn sequencer(duration: u32, cycles: u32) -> Sequencer<'static, StepRng> {
        Sequencer::new(
            SequencerConfig::new(duration, cycles),
            affirmations::AFFIRMATIONS,
            StepRng::new(0, 1),
        )
    }

    #[test]
    fn test_single_cycle_frame_count() {
        let mut seq = sequencer(4, 1);
        let frames: Vec<_> = seq.by_ref().collect();
        assert_eq!(frames.len(), 28);
        assert_eq!(seq.finish(), Some(1));
    }

    #[test]
    fn test_finish_before_exhausted() {
        let mut seq = sequencer(4, 1);
        assert_eq!(seq.finish(), None);
        seq.next();
        assert_eq!(seq.finish(), None);
    }

    #[test]
    fn test_phase_trajectories() {
        let frames: Vec<_> = sequencer(4, 1).collect();

        let inhale: Vec<u8> = frames[0..10].iter().map(|f| f.size).collect();
        assert_eq!(inhale, (1..=10).collect::<Vec<u8>>());
        assert!(frames[0..10].iter().all(|f| f.phase == CyclePhase::Inhale));

        let hold: Vec<_> = frames[10..14].iter().map(|f| (f.size, f.countdown)).collect();
        assert_eq!(hold, vec![(10, Some(4)), (10, Some(3)), (10, Some(2)), (10, Some(1))]);

        let exhale: Vec<u8> = frames[14..24].iter().map(|f| f.size).collect();
        assert_eq!(exhale, (1..=10).rev().collect::<Vec<u8>>());

        assert!(frames[24..28]
            .iter()
            .all(|f| f.phase == CyclePhase::HoldEmpty && f.size == 1));
    }

    #[test]
    fn test_intervals() {
        let frames: Vec<_> = sequencer(4, 1).collect();
        assert_eq!(frames[0].interval, Duration::from_millis(400));
        assert_eq!(frames[10].interval, Duration::from_secs(1));

        let frames: Vec<_> = sequencer(7, 1).collect();
        assert_eq!(frames[0].interval, Duration::from_millis(700));
    }

    #[test]
    fn test_labels() {
        let frames: Vec<_> = sequencer(4, 1).collect();
        assert_eq!(frames[0].label(), "Step 1: Inhale...");
        assert_eq!(frames[10].label(), "Step 2: Hold... (4s)");
        assert_eq!(frames[14].label(), "Step 3: Exhale...");
        assert_eq!(frames[27].label(), "Step 4: Hold... (1s)");
    }

    #[test]
    fn test_message_held_per_cycle() {
        let frames: Vec<_> = sequencer(2, 3).collect();
        for cycle in frames.chunks(SequencerConfig::new(2, 3).frames_per_cycle()) {
            assert!(cycle.iter().all(|f| f.message == cycle[0].message));
            assert!(cycle.iter().all(|f| f.cycle == cycle[0].cycle));
        }
    }

    #[test]
    fn test_zero_cycles() {
        let mut seq = sequencer(4, 0);
        assert!(seq.next().is_none());
        assert_eq!(seq.finish(), Some(0));
    }

    #[test]
    fn test_not_restartable() {
        let mut seq = sequencer(1, 1);
        assert_eq!(seq.by_ref().count(), 22);
        assert!(seq.next().is_none());
        assert_eq!(seq.finish(), Some(1));
    }
}
