//! CLI module for gotools-binstubs - command-line flags and mode selection.

pub mod commands;

pub use commands::{Cli, Mode};
