//! Persisted progress record and the pure session transition.
//!
//! On disk the record is a single camelCase JSON object:
//! `{"totalBreaths":112,"streak":4,"lastDate":"2024-01-02","rank":"Calm Novice","icon":"🌱"}`

use crate::rank::{rank_for, RANKS};
use crate::BREATHS_PER_CYCLE;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Date format written to disk
const DATE_FORMAT: &str = "%Y-%m-%d";

/// US locale format written by older revisions of the tool
const LEGACY_DATE_FORMAT: &str = "%m/%d/%Y";

/// Gamified progress, one per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    pub total_breaths: u64,
    pub streak: u32,
    #[serde(
        serialize_with = "serialize_date",
        deserialize_with = "deserialize_date"
    )]
    pub last_date: Option<NaiveDate>,
    pub rank: String,
    pub icon: String,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            total_breaths: 0,
            streak: 0,
            last_date: None,
            rank: RANKS[0].name.to_string(),
            icon: RANKS[0].icon.to_string(),
        }
    }
}

impl ProgressRecord {
    /// Overwrite rank/icon from the current total. Returns true if the rank changed.
    pub fn refresh_rank(&mut self) -> bool {
        let tier = rank_for(self.total_breaths);
        let changed = self.rank != tier.name;
        self.rank = tier.name.to_string();
        self.icon = tier.icon.to_string();
        changed
    }

    /// Apply one session of `cycles` completed cycles on `today`.
    ///
    /// Returns the breaths earned and whether the rank changed. A session
    /// with no cycles leaves the record untouched.
    pub fn apply_session(&mut self, cycles: u32, today: NaiveDate) -> (u64, bool) {
        let earned = u64::from(cycles).saturating_mul(BREATHS_PER_CYCLE);
        if earned == 0 {
            return (0, false);
        }

        let prior_rank = rank_for(self.total_breaths).name;
        self.streak = next_streak(self.streak, self.last_date, today);
        self.total_breaths = self.total_breaths.saturating_add(earned);
        self.last_date = Some(today);
        self.refresh_rank();

        (earned, self.rank != prior_rank)
    }
}

/// Streak after a session on `today`.
///
/// Same day keeps the streak, the following day extends it, anything
/// else (a gap, a first session, a clock that went backwards) starts over.
pub fn next_streak(streak: u32, last_date: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(last) = last_date else {
        return 1;
    };
    if streak == 0 {
        return 1;
    }

    match (today - last).num_days() {
        0 => streak,
        1 => streak.saturating_add(1),
        _ => 1,
    }
}

/// Parse a stored date, accepting both the current and the legacy format
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_DATE_FORMAT))
        .ok()
}

fn serialize_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.serialize_some(&d.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        let parsed = parse_date(s);
        if parsed.is_none() {
            tracing::debug!(last_date = s, "ignoring unparseable lastDate");
        }
        parsed
    }))
}
