//! Rank tiers unlocked by cumulative breath count.
//!
//! Ranks are never stored independently: every load and every update
//! recomputes them from `total_breaths` through this table.

/// A named milestone unlocked at a cumulative breath threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankLevel {
    /// Minimum total breaths for this tier
    pub threshold: u64,
    /// Display name
    pub name: &'static str,
    /// Glyph shown next to the name
    pub icon: &'static str,
}

impl RankLevel {
    const fn new(threshold: u64, name: &'static str, icon: &'static str) -> Self {
        Self { threshold, name, icon }
    }
}

/// All tiers, ascending by threshold. The first tier starts at 0.
pub const RANKS: [RankLevel; 9] = [
    RankLevel::new(0, "Baby Breather", "🐣"),
    RankLevel::new(100, "Calm Novice", "🌱"),
    RankLevel::new(250, "Mindful Apprentice", "🍃"),
    RankLevel::new(500, "Steady Breather", "🌿"),
    RankLevel::new(1000, "Zen Seeker", "🪷"),
    RankLevel::new(2000, "Serenity Adept", "🌊"),
    RankLevel::new(3500, "Breath Master", "🧘"),
    RankLevel::new(6000, "Enlightened Soul", "🌟"),
    RankLevel::new(10000, "Breath Legend", "🏆"),
];

/// Name reported as the next level once the top tier is reached
pub const MAX_LEVEL: &str = "Max Level";

/// Highest tier whose threshold is <= `total_breaths`
pub fn rank_for(total_breaths: u64) -> &'static RankLevel {
    RANKS
        .iter()
        .rev()
        .find(|r| r.threshold <= total_breaths)
        .unwrap_or(&RANKS[0])
}

/// Position of the current tier in [`RANKS`]
pub fn tier_index(total_breaths: u64) -> usize {
    RANKS
        .iter()
        .rposition(|r| r.threshold <= total_breaths)
        .unwrap_or(0)
}

/// The tier after the current one, `None` at the top
pub fn next_rank(total_breaths: u64) -> Option<&'static RankLevel> {
    RANKS.get(tier_index(total_breaths) + 1)
}

/// Fraction of the way from the current tier to the next (0.0 - 1.0).
/// Always 1.0 at the top tier.
pub fn level_progress(total_breaths: u64) -> f32 {
    let current = rank_for(total_breaths);
    match next_rank(total_breaths) {
        Some(next) => {
            let span = next.threshold - current.threshold;
            let done = total_breaths - current.threshold;
            (done as f32 / span as f32).clamp(0.0, 1.0)
        }
        None => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(RANKS.len(), 9);
        assert_eq!(RANKS[0].threshold, 0);
        assert_eq!(RANKS[8].threshold, 10000);
        assert!(RANKS.windows(2).all(|w| w[0].threshold < w[1].threshold));
    }

    #[test]
    fn test_rank_for_zero() {
        assert_eq!(rank_for(0).name, "Baby Breather");
    }

    #[test]
    fn test_rank_at_threshold() {
        assert_eq!(rank_for(99).name, "Baby Breather");
        assert_eq!(rank_for(100).name, "Calm Novice");
        assert_eq!(rank_for(999).name, "Steady Breather");
        assert_eq!(rank_for(1000).name, "Zen Seeker");
        assert_eq!(rank_for(10000).name, "Breath Legend");
        assert_eq!(rank_for(u64::MAX).name, "Breath Legend");
    }

    #[test]
    fn test_rank_is_monotonic() {
        let mut last = 0;
        for total in (0..12_000).step_by(7) {
            let idx = tier_index(total);
            assert!(idx >= last, "tier dropped at {}", total);
            last = idx;
        }
    }

    #[test]
    fn test_next_rank() {
        assert_eq!(next_rank(0).map(|r| r.threshold), Some(100));
        assert_eq!(next_rank(112).map(|r| r.name), Some("Mindful Apprentice"));
        assert!(next_rank(10000).is_none());
    }

    #[test]
    fn test_level_progress() {
        assert_eq!(level_progress(0), 0.0);
        assert_eq!(level_progress(50), 0.5);
        assert_eq!(level_progress(175), 0.5);
        assert_eq!(level_progress(20000), 1.0);
    }
}
