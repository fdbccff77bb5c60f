//! Frame rendering: sequencer frames plus a theme become screen text.
//!
//! Everything here returns strings; the session runner decides where
//! they go.

use breathe_shared::sequencer::{CyclePhase, RenderFrame, MAX_SIZE};
use breathe_shared::Theme;
use owo_colors::{AnsiColors, OwoColorize};

/// Spaces left of the box
const SIDE_MARGIN: usize = 10;

/// Blank lines above the box
const TOP_MARGIN: usize = 2;

pub const INTRO: &str = "Ready? Let's take a moment for yourself.";
pub const OUTRO: &str = "Great job. You are ready to go back now.";
pub const INTERRUPTED: &str = "Session ended early. No progress was recorded this time.";

/// Colors on or off for one render pass
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Whether color should be used on stdout: a terminal without NO_COLOR
    pub fn detect() -> Self {
        use std::io::IsTerminal;
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(std::io::stdout().is_terminal() && !no_color)
    }

    pub fn is_color(&self) -> bool {
        self.color
    }

    pub fn paint(&self, text: &str, color: AnsiColors) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn paint_bold(&self, text: &str, color: AnsiColors) -> String {
        if self.color {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// The 10x10 grid with a centered `size` x `size` box
pub fn draw_box(size: u8, theme: &Theme, painter: Painter) -> String {
    let max = usize::from(MAX_SIZE);
    let size = usize::from(size.min(MAX_SIZE));
    let offset = (max - size) / 2;

    let filled = painter.paint(&format!("{} ", theme.filled_glyph), theme.filled);
    let empty = painter.paint(&format!("{} ", theme.empty_glyph), theme.empty);

    let mut display = "\n".repeat(TOP_MARGIN);
    for row in 0..max {
        display.push_str(&" ".repeat(SIDE_MARGIN));
        for col in 0..max {
            let inside_row = row >= offset && row < offset + size;
            let inside_col = col >= offset && col < offset + size;
            if inside_row && inside_col {
                display.push_str(&filled);
            } else {
                display.push_str(&empty);
            }
        }
        display.push('\n');
    }
    display.push('\n');
    display
}

fn phase_color(phase: CyclePhase, theme: &Theme) -> AnsiColors {
    match phase {
        CyclePhase::Inhale => theme.inhale,
        CyclePhase::HoldFull | CyclePhase::HoldEmpty => theme.hold,
        CyclePhase::Exhale => theme.exhale,
    }
}

/// Label, box, and affirmation for one frame
pub fn render_frame(frame: &RenderFrame, theme: &Theme, painter: Painter) -> String {
    let mut out = painter.paint(&frame.label(), phase_color(frame.phase, theme));
    out.push('\n');
    out.push_str(&draw_box(frame.size, theme, painter));
    out.push_str(&painter.paint_bold(frame.message, theme.message));
    out.push('\n');
    out
}

pub fn render_intro(painter: Painter) -> String {
    format!("{}\n\n", painter.paint(INTRO, AnsiColors::Cyan))
}

pub fn render_outro(painter: Painter) -> String {
    format!("{}\n", painter.paint(OUTRO, AnsiColors::Magenta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn plain() -> Painter {
        Painter::new(false)
    }

    fn grid_rows(drawn: &str) -> Vec<&str> {
        drawn.lines().filter(|l| !l.trim().is_empty()).collect()
    }

    #[test]
    fn test_box_full() {
        let drawn = draw_box(10, &Theme::default(), plain());
        let rows = grid_rows(&drawn);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.trim_end() == format!("{}{}", " ".repeat(10), "* ".repeat(10)).trim_end()));
    }

    #[test]
    fn test_box_single_cell() {
        let drawn = draw_box(1, &Theme::default(), plain());
        assert_eq!(drawn.matches('*').count(), 1);
        let rows = grid_rows(&drawn);
        // offset (10 - 1) / 2 = 4
        assert!(rows[4].contains('*'));
    }

    #[test]
    fn test_box_cell_count() {
        for size in 1..=10u8 {
            let drawn = draw_box(size, &Theme::default(), plain());
            assert_eq!(drawn.matches('*').count(), usize::from(size) * usize::from(size));
            assert_eq!(drawn.matches('.').count(), 100 - usize::from(size) * usize::from(size));
        }
    }

    #[test]
    fn test_theme_glyphs() {
        let ocean = Theme::lookup("ocean");
        let drawn = draw_box(3, &ocean, plain());
        assert_eq!(drawn.matches('~').count(), 9);
    }

    #[test]
    fn test_render_frame_plain() {
        let frame = RenderFrame {
            phase: CyclePhase::HoldFull,
            cycle: 1,
            size: 10,
            countdown: Some(3),
            message: "You are doing a great job.",
            interval: Duration::from_secs(1),
        };
        let text = render_frame(&frame, &Theme::default(), plain());
        assert!(text.starts_with("Step 2: Hold... (3s)\n"));
        assert!(text.trim_end().ends_with("You are doing a great job."));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let text = render_intro(Painter::new(true));
        assert!(text.contains('\x1b'));
        assert!(text.contains(INTRO));
    }
}
