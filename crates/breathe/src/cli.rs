//! CLI - Command-line argument parsing
//!
//! Besides the regular clap flags, two shorthands are accepted:
//! `--<seconds>` (e.g. `--6`) for the phase duration and `--<theme>`
//! (e.g. `--ocean`) for the theme. Any other unknown `--word` is read as
//! a theme name, which falls back to the default theme. Arguments that
//! still make no sense (unknown short flags, bad numbers, stray words)
//! are set aside in `Cli::ignored` and logged, so a typo never stops a
//! session from starting.

use breathe_shared::Theme;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::iter::Peekable;
use std::path::PathBuf;

/// Long flags that take a value
const VALUE_FLAGS: &[&str] = &["theme", "duration", "cycles", "stats-file"];

/// Value flags whose value must be a whole number
const NUMBER_FLAGS: &[&str] = &["duration", "cycles"];

/// Long flags that are plain switches
const SWITCH_FLAGS: &[&str] = &[
    "random", "focus", "stats", "reset", "yes", "verbose", "help", "version",
];

/// Short switches and the long flag each stands for (`-d` is handled apart)
const SHORT_SWITCHES: &[(char, &str)] = &[
    ('y', "yes"),
    ('v', "verbose"),
    ('h', "help"),
    ('V', "version"),
];

/// Box breathing in your terminal
#[derive(Parser, Debug, Default)]
#[command(name = "breathe")]
#[command(about = "Box breathing in your terminal - inhale, hold, exhale, hold", long_about = None)]
#[command(version = env!("BREATHE_VERSION"))]
#[command(args_override_self = true)]
pub struct Cli {
    /// Color theme (unknown names use the default theme)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Pick a random theme
    #[arg(long, overrides_with = "theme")]
    pub random: bool,

    /// Seconds per phase (1-60)
    #[arg(short, long, value_name = "SECS")]
    pub duration: Option<u32>,

    /// Breathing cycles per session
    #[arg(long, value_name = "N")]
    pub cycles: Option<u32>,

    /// Deep focus: hide the cursor, silence typing, beep when done
    #[arg(long)]
    pub focus: bool,

    /// Show your progress and exit
    #[arg(long)]
    pub stats: bool,

    /// Delete all saved progress (wins over --stats)
    #[arg(long)]
    pub reset: bool,

    /// Skip the reset confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Stats file location (overrides config and $BREATHE_STATS_FILE)
    #[arg(long, value_name = "PATH")]
    pub stats_file: Option<PathBuf>,

    /// Debug logging to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Arguments that were dropped during normalization
    #[arg(skip)]
    pub ignored: Vec<String>,
}

impl Cli {
    /// Parse from raw process arguments, applying the shorthands first
    pub fn parse_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let normalized = normalize_args(args);
        let matches = Self::command()
            .after_help(help_footer())
            .get_matches_from(normalized.args);
        let mut cli = Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
        cli.ignored = normalized.ignored;
        cli
    }
}

fn help_footer() -> String {
    let themes: Vec<_> = Theme::names().collect();
    format!(
        "Shorthands: --<seconds> sets the duration (e.g. --6), \
--<theme> picks a theme (e.g. --ocean).\nThemes: {}",
        themes.join(", ")
    )
}

/// Arguments ready for clap, plus the ones set aside
#[derive(Debug, Default, PartialEq)]
pub struct NormalizedArgs {
    pub args: Vec<String>,
    pub ignored: Vec<String>,
}

impl NormalizedArgs {
    fn push_switch(&mut self, name: &str) {
        self.args.push(format!("--{}", name));
    }

    fn push_value(&mut self, name: &str, value: Option<String>, original: &str) {
        match value {
            Some(v) if v.trim().is_empty() => self.ignored.push(original.to_string()),
            Some(v) if NUMBER_FLAGS.contains(&name) && v.trim().parse::<u32>().is_err() => {
                self.ignored.push(format!("--{}={}", name, v))
            }
            Some(v) => self.args.push(format!("--{}={}", name, v.trim())),
            None => self.ignored.push(original.to_string()),
        }
    }

    fn push_short<I>(&mut self, cluster: &str, rest: &mut Peekable<I>)
    where
        I: Iterator<Item = String>,
    {
        for (i, c) in cluster.char_indices() {
            if c == 'd' {
                let attached = cluster[i + 1..].trim_start_matches('=');
                let value = if attached.is_empty() {
                    next_value("duration", rest)
                } else {
                    Some(attached.to_string())
                };
                self.push_value("duration", value, &format!("-{}", &cluster[i..]));
                return;
            }
            match SHORT_SWITCHES.iter().find(|(short, _)| *short == c) {
                Some((_, long)) => self.push_switch(long),
                None => self.ignored.push(format!("-{}", c)),
            }
        }
    }
}

/// Rewrite raw arguments into a form clap always accepts.
///
/// - `--<digits>` becomes `--duration=<digits>`
/// - an unknown `--<word>` becomes `--theme=<word>`
/// - `--switch=<value>` keeps the switch for a true-ish value
///   (`yes`, `true`, `on`, `1`) and drops it for a false-ish one
/// - value flags are joined with their value; a missing value or a
///   non-numeric duration or cycle count is set aside
/// - unknown short flags, stray words, and anything after a bare `--`
///   are set aside
///
/// The first argument (program name) is kept as is.
pub fn normalize_args<I>(args: I) -> NormalizedArgs
where
    I: IntoIterator<Item = String>,
{
    let mut rest = args.into_iter().peekable();
    let mut out = NormalizedArgs::default();
    out.args.extend(rest.next());

    while let Some(arg) = rest.next() {
        if arg == "--" {
            out.ignored.extend(rest.by_ref());
            break;
        }

        if let Some(body) = arg.strip_prefix("--") {
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (body, None),
            };

            if VALUE_FLAGS.contains(&name) {
                let value = inline.or_else(|| next_value(name, &mut rest));
                out.push_value(name, value, &arg);
            } else if SWITCH_FLAGS.contains(&name) {
                match inline.as_deref().map(parse_switch) {
                    None | Some(Some(true)) => out.push_switch(name),
                    Some(Some(false)) => {}
                    Some(None) => out.ignored.push(arg.clone()),
                }
            } else if inline.is_some() || name.is_empty() {
                out.ignored.push(arg.clone());
            } else if name.chars().all(|c| c.is_ascii_digit()) {
                out.push_value("duration", Some(name.to_string()), &arg);
            } else {
                out.push_value("theme", Some(name.to_string()), &arg);
            }
        } else if let Some(cluster) = arg.strip_prefix('-').filter(|c| !c.is_empty()) {
            out.push_short(cluster, &mut rest);
        } else {
            out.ignored.push(arg);
        }
    }

    out
}

/// Take the next argument as a flag value when it looks like one
fn next_value<I>(name: &str, rest: &mut Peekable<I>) -> Option<String>
where
    I: Iterator<Item = String>,
{
    let takes = rest.peek().is_some_and(|next| {
        !next.starts_with('-') || (NUMBER_FLAGS.contains(&name) && next.parse::<i64>().is_ok())
    });
    if takes {
        rest.next()
    } else {
        None
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
