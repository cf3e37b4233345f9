//! gotools-binstubs - Binstub generation for Go tool dependencies
//!
//! Turns a list of tool declarations into checked-in launcher scripts that
//! run each tool through `go run`, plus an optional `tools.go` aggregator
//! file importing the unpinned tools.

pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod scan;

pub use config::{GenerationOptions, ToolDeclaration};
pub use error::{BinstubsError, Result};
pub use generate::{Generator, Outcome, generate};
