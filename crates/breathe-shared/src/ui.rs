//! Terminal UI helpers for consistent output styling.

/// ANSI color codes using true color (24-bit)
pub mod colors {
    pub const HEADER: &str = "\x1b[38;2;255;210;120m";
    pub const OK: &str = "\x1b[38;2;120;255;120m";
    pub const WARN: &str = "\x1b[38;2;255;200;100m";
    pub const DIM: &str = "\x1b[38;2;140;140;140m";
    pub const CYAN: &str = "\x1b[38;2;100;200;255m";
    pub const MAGENTA: &str = "\x1b[38;2;230;130;255m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Unicode symbols
pub mod symbols {
    pub const ARROW: &str = "›";
    pub const FLAME: &str = "🔥";
    pub const PROGRESS_FULL: &str = "█";
    pub const PROGRESS_EMPTY: &str = "░";
}

/// Horizontal rule
pub const HR: &str = "────────────────────────────────────────────────────────";

/// Format a progress bar. `progress` is clamped to 0.0 - 1.0.
pub fn progress_bar(progress: f32, width: usize) -> String {
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    let filled = (progress * width as f32) as usize;
    let empty = width.saturating_sub(filled);
    format!(
        "[{}{}]",
        symbols::PROGRESS_FULL.repeat(filled),
        symbols::PROGRESS_EMPTY.repeat(empty)
    )
}

/// "1 day" / "3 days"
pub fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.5, 10), "[█████░░░░░]");
        assert_eq!(progress_bar(1.0, 10), "[██████████]");
        assert_eq!(progress_bar(0.0, 10), "[░░░░░░░░░░]");
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert_eq!(progress_bar(1.7, 4), "[████]");
        assert_eq!(progress_bar(-0.3, 4), "[░░░░]");
        assert_eq!(progress_bar(f32::NAN, 4), "[░░░░]");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "day"), "1 day");
        assert_eq!(plural(4, "day"), "4 days");
    }
}
