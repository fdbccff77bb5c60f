//! Stats display for breathe.
//!
//! Rank with icon, a progress bar toward the next rank, totals and the
//! streak. Formatting returns strings; callers print them.

use breathe_shared::ui::{colors, plural, progress_bar, symbols, HR};
use breathe_shared::{SessionOutcome, VERSION};

/// Width of the next-rank progress bar
const BAR_WIDTH: usize = 20;

/// Key column width
const KEY_WIDTH: usize = 14;

/// ANSI codes, or nothing when color is off
#[derive(Debug, Clone, Copy)]
struct Style {
    color: bool,
}

impl Style {
    fn code(&self, code: &'static str) -> &'static str {
        if self.color {
            code
        } else {
            ""
        }
    }
}

fn kv(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("  {:width$} {}\n", key, value, width = KEY_WIDTH));
}

/// Rank line plus progress bar toward the next rank
fn format_rank_block(out: &mut String, outcome: &SessionOutcome, style: Style) {
    let record = &outcome.record;
    out.push_str(&format!(
        "  {} {}{}{}{}\n",
        record.icon,
        style.code(colors::BOLD),
        style.code(colors::CYAN),
        record.rank,
        style.code(colors::RESET)
    ));

    if outcome.is_degraded() {
        return;
    }
    let bar = progress_bar(outcome.progress(), BAR_WIDTH);
    if outcome.is_max_level() {
        out.push_str(&format!(
            "  {}{}{} Max level reached\n",
            style.code(colors::OK),
            bar,
            style.code(colors::RESET)
        ));
    } else {
        out.push_str(&format!(
            "  {}{}{} {}/{} to {}\n",
            style.code(colors::OK),
            bar,
            style.code(colors::RESET),
            record.total_breaths,
            outcome.next_level_goal,
            outcome.next_level_name
        ));
    }
}

fn streak_value(streak: u32) -> String {
    let days = plural(u64::from(streak), "day");
    if streak >= 2 {
        format!("{} {}", days, symbols::FLAME)
    } else {
        days
    }
}

fn degraded_note(out: &mut String, style: Style) {
    out.push_str(&format!(
        "  {}Progress could not be saved or loaded this time.{}\n",
        style.code(colors::WARN),
        style.code(colors::RESET)
    ));
}

/// Read-only `--stats` view
pub fn format_stats(outcome: &SessionOutcome, color: bool) -> String {
    let style = Style { color };
    let record = &outcome.record;
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}breathe stats v{}{}\n",
        style.code(colors::HEADER),
        VERSION,
        style.code(colors::RESET)
    ));
    out.push_str(&format!("{}{}{}\n", style.code(colors::DIM), HR, style.code(colors::RESET)));

    if outcome.is_degraded() {
        degraded_note(&mut out, style);
    } else {
        format_rank_block(&mut out, outcome, style);
        out.push('\n');
        kv(&mut out, "total_breaths", &record.total_breaths.to_string());
        kv(&mut out, "streak", &streak_value(record.streak));
        let last = record
            .last_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".to_string());
        kv(&mut out, "last_session", &last);
        if !outcome.is_max_level() {
            kv(&mut out, "to_next_rank", &outcome.breaths_to_next().to_string());
        }
    }

    out.push_str(&format!("{}{}{}\n", style.code(colors::DIM), HR, style.code(colors::RESET)));
    out
}

/// Summary after a completed session
pub fn format_session_summary(outcome: &SessionOutcome, color: bool) -> String {
    let style = Style { color };
    let record = &outcome.record;
    let mut out = String::new();

    out.push('\n');
    if outcome.is_degraded() {
        degraded_note(&mut out, style);
        return out;
    }

    out.push_str(&format!(
        "  {}+{} breaths{}   {} total   streak: {}\n",
        style.code(colors::OK),
        outcome.breaths_earned,
        style.code(colors::RESET),
        record.total_breaths,
        streak_value(record.streak)
    ));

    if outcome.level_up {
        out.push_str(&format!(
            "\n  {}{}🎉 LEVEL UP! You are now a {} {}{}\n",
            style.code(colors::BOLD),
            style.code(colors::MAGENTA),
            record.rank,
            record.icon,
            style.code(colors::RESET)
        ));
    }

    out.push('\n');
    format_rank_block(&mut out, outcome, style);
    out
}

/// One-line hint under the summary
pub fn format_hint(color: bool) -> String {
    let style = Style { color };
    format!(
        "  {}{} breathe --stats to see your progress{}\n",
        style.code(colors::DIM),
        symbols::ARROW,
        style.code(colors::RESET)
    )
}
