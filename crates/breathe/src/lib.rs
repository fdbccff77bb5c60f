//! breathe library - the terminal shell around `breathe_shared`.
//!
//! Exposed as a library so integration tests can drive the runner and
//! the formatting without a real terminal.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
pub mod session;
pub mod stats_display;
pub mod terminal;
