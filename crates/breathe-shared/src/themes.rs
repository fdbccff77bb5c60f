//! Color themes for the breathing box.

use owo_colors::AnsiColors;
use rand::Rng;

/// A named palette plus the glyphs used for box cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Cells inside the box
    pub filled: AnsiColors,
    /// Cells outside the box
    pub empty: AnsiColors,
    pub inhale: AnsiColors,
    pub hold: AnsiColors,
    pub exhale: AnsiColors,
    pub message: AnsiColors,
    pub filled_glyph: &'static str,
    pub empty_glyph: &'static str,
}

pub const DEFAULT_THEME: &str = "calm";

pub const THEMES: [Theme; 6] = [
    Theme {
        name: "calm",
        filled: AnsiColors::White,
        empty: AnsiColors::BrightBlack,
        inhale: AnsiColors::Green,
        hold: AnsiColors::Blue,
        exhale: AnsiColors::Yellow,
        message: AnsiColors::Cyan,
        filled_glyph: "*",
        empty_glyph: ".",
    },
    Theme {
        name: "ocean",
        filled: AnsiColors::BrightCyan,
        empty: AnsiColors::Blue,
        inhale: AnsiColors::BrightCyan,
        hold: AnsiColors::BrightBlue,
        exhale: AnsiColors::Cyan,
        message: AnsiColors::BrightWhite,
        filled_glyph: "~",
        empty_glyph: ".",
    },
    Theme {
        name: "forest",
        filled: AnsiColors::BrightGreen,
        empty: AnsiColors::Green,
        inhale: AnsiColors::BrightGreen,
        hold: AnsiColors::Yellow,
        exhale: AnsiColors::Green,
        message: AnsiColors::BrightYellow,
        filled_glyph: "♣",
        empty_glyph: ".",
    },
    Theme {
        name: "sunset",
        filled: AnsiColors::BrightYellow,
        empty: AnsiColors::Red,
        inhale: AnsiColors::BrightYellow,
        hold: AnsiColors::BrightRed,
        exhale: AnsiColors::Magenta,
        message: AnsiColors::BrightMagenta,
        filled_glyph: "●",
        empty_glyph: "·",
    },
    Theme {
        name: "lavender",
        filled: AnsiColors::BrightMagenta,
        empty: AnsiColors::Magenta,
        inhale: AnsiColors::BrightMagenta,
        hold: AnsiColors::BrightBlue,
        exhale: AnsiColors::Magenta,
        message: AnsiColors::BrightWhite,
        filled_glyph: "✿",
        empty_glyph: "·",
    },
    Theme {
        name: "mono",
        filled: AnsiColors::White,
        empty: AnsiColors::BrightBlack,
        inhale: AnsiColors::White,
        hold: AnsiColors::White,
        exhale: AnsiColors::White,
        message: AnsiColors::White,
        filled_glyph: "#",
        empty_glyph: ".",
    },
];

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}

impl Theme {
    /// Case-insensitive lookup, if the name is known
    pub fn find(name: &str) -> Option<Theme> {
        let name = name.trim();
        THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Lookup that falls back to the default theme for unknown names
    pub fn lookup(name: &str) -> Theme {
        Self::find(name).unwrap_or_else(|| {
            tracing::debug!(theme = name, "unknown theme, using {}", DEFAULT_THEME);
            Theme::default()
        })
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Theme {
        THEMES[rng.gen_range(0..THEMES.len())]
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        THEMES.iter().map(|t| t.name)
    }
}
