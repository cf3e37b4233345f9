//! Generation orchestrator.
//!
//! Applies defaults, then writes the aggregator file (when requested) and
//! the binstubs, in that order. The first failure aborts the pass; files
//! already written stay on disk.

use std::path::{Path, PathBuf};

use crate::config::GenerationOptions;
use crate::emit::{write_aggregator, write_binstubs};
use crate::error::Result;

/// Result of a generation pass that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No tools were declared; nothing was written.
    NoOp,
    /// All requested files were written.
    Success {
        aggregator: Option<PathBuf>,
        binstubs: Vec<PathBuf>,
    },
}

impl Outcome {
    /// Every path written during the pass.
    pub fn written(&self) -> Vec<&Path> {
        match self {
            Outcome::NoOp => Vec::new(),
            Outcome::Success { aggregator, binstubs } => aggregator
                .iter()
                .chain(binstubs)
                .map(PathBuf::as_path)
                .collect(),
        }
    }
}

/// Drives one generation pass over a [`GenerationOptions`] value.
#[derive(Debug)]
pub struct Generator {
    options: GenerationOptions,
    root: PathBuf,
}

impl Generator {
    /// Create a generator writing relative paths against the current directory.
    pub fn new(options: GenerationOptions) -> Self {
        Self {
            options,
            root: PathBuf::new(),
        }
    }

    /// Resolve relative output paths against `root` instead.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Override the binstubs directory from the options.
    pub fn with_binstubs_dir(mut self, dir: impl Into<String>) -> Self {
        self.options.binstubs_directory_path = dir.into();
        self
    }

    /// The options this generator runs with.
    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Run the pass, consuming the generator.
    pub fn run(mut self) -> Result<Outcome> {
        if self.options.tools.is_empty() {
            log::info!("No tools declared, nothing to generate");
            return Ok(Outcome::NoOp);
        }

        self.options.apply_defaults();

        let aggregator = if self.options.emit_aggregator_file {
            Some(write_aggregator(&self.options, &self.root)?)
        } else {
            None
        };

        let binstubs = write_binstubs(&self.options, &self.root)?;
        log::debug!("Generated {} binstubs", binstubs.len());

        Ok(Outcome::Success { aggregator, binstubs })
    }
}

/// Run a generation pass for `options` under `root`.
pub fn generate(options: GenerationOptions, root: &Path) -> Result<Outcome> {
    Generator::new(options).with_root(root).run()
}
