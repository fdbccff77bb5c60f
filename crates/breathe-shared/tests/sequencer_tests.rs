//! Tests for the breathing sequencer frame schedule.

use breathe_shared::affirmations::AFFIRMATIONS;
use breathe_shared::{CyclePhase, Sequencer, SequencerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[test]
fn test_default_run_shape() {
    let config = SequencerConfig::default();
    let mut seq = Sequencer::new(config, AFFIRMATIONS, StdRng::seed_from_u64(1));

    let frames: Vec<_> = seq.by_ref().collect();
    assert_eq!(frames.len(), 4 * 28);
    assert_eq!(frames.len(), config.total_frames());
    assert_eq!(seq.finish(), Some(4));
    assert_eq!(frames.last().map(|f| f.cycle), Some(4));
}

#[test]
fn test_same_seed_same_messages() {
    let config = SequencerConfig::new(2, 6);
    let a: Vec<_> = Sequencer::new(config, AFFIRMATIONS, StdRng::seed_from_u64(9))
        .map(|f| f.message)
        .collect();
    let b: Vec<_> = Sequencer::new(config, AFFIRMATIONS, StdRng::seed_from_u64(9))
        .map(|f| f.message)
        .collect();
    assert_eq!(a, b);
}

#[test]
fn test_phase_order_per_cycle() {
    let config = SequencerConfig::new(3, 2);
    let frames: Vec<_> = Sequencer::new(config, AFFIRMATIONS, StdRng::seed_from_u64(3)).collect();

    let mut phases: Vec<CyclePhase> = frames.iter().map(|f| f.phase).collect();
    phases.dedup();
    assert_eq!(
        phases,
        vec![
            CyclePhase::Inhale,
            CyclePhase::HoldFull,
            CyclePhase::Exhale,
            CyclePhase::HoldEmpty,
            CyclePhase::Inhale,
            CyclePhase::HoldFull,
            CyclePhase::Exhale,
            CyclePhase::HoldEmpty,
        ]
    );
}

#[test]
fn test_run_duration() {
    // 10 * 400ms + 4 * 1s, twice per cycle
    let config = SequencerConfig::new(4, 1);
    let total: Duration = Sequencer::new(config, AFFIRMATIONS, StdRng::seed_from_u64(0))
        .map(|f| f.interval)
        .sum();
    assert_eq!(total, Duration::from_secs(16));
}

#[test]
fn test_sizes_stay_in_range() {
    let config = SequencerConfig::new(5, 3);
    assert!(Sequencer::new(config, AFFIRMATIONS, StdRng::seed_from_u64(5))
        .all(|f| (1..=10).contains(&f.size)));
}
