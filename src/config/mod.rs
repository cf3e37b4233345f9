//! Configuration model for binstub generation.
//!
//! A [`GenerationOptions`] value comes from one of three places:
//! 1. A YAML document passed with `--input`
//! 2. A scan of an existing `tools.go` (see [`crate::scan`])
//! 3. The built-in template written by `--gentemplate`

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{BinstubsError, Result};

pub use self::modifiers::resolve_modifiers;
pub use self::template::TEMPLATE_YAML;
pub use self::tool::{RUNNER_COMMAND, ToolDeclaration, VERSION_SEPARATOR};

mod modifiers;
mod template;
mod tool;

/// Default aggregator file path.
pub const DEFAULT_AGGREGATOR_FILE_PATH: &str = "tools.go";

/// Default binstubs directory.
pub const DEFAULT_BINSTUBS_DIRECTORY_PATH: &str = "bin";

/// Everything one generation pass needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Package name declared in the aggregator file.
    pub aggregator_package_name: Option<String>,

    /// Tools in emission order.
    pub tools: Vec<ToolDeclaration>,

    /// Flags placed after `go run` for every tool.
    pub global_run_modifiers: Vec<String>,

    /// Tags ANDed into the aggregator's `//go:build` line.
    pub build_constraint_tags: Vec<String>,

    /// Write the aggregator file.
    pub emit_aggregator_file: bool,

    /// Where the aggregator file goes.
    pub aggregator_file_path: String,

    /// Where binstubs go.
    pub binstubs_directory_path: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            aggregator_package_name: None,
            tools: Vec::new(),
            global_run_modifiers: Vec::new(),
            build_constraint_tags: Vec::new(),
            emit_aggregator_file: true,
            aggregator_file_path: DEFAULT_AGGREGATOR_FILE_PATH.to_string(),
            binstubs_directory_path: DEFAULT_BINSTUBS_DIRECTORY_PATH.to_string(),
        }
    }
}

impl GenerationOptions {
    /// Load options from a YAML document on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| BinstubsError::io(&path, e))?;
        let options = Self::from_yaml(&content)?;
        log::debug!(
            "Loaded {} tool declarations from {}",
            options.tools.len(),
            path.as_ref().display()
        );
        Ok(options)
    }

    /// Parse options from YAML text. Unknown keys are ignored.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// The example options shipped as the self-documenting template.
    pub fn template() -> Self {
        template::template_options()
    }

    /// Apply per-tool defaults. Idempotent.
    pub fn apply_defaults(&mut self) {
        if self.aggregator_file_path.is_empty() {
            self.aggregator_file_path = DEFAULT_AGGREGATOR_FILE_PATH.to_string();
        }
        if self.binstubs_directory_path.is_empty() {
            self.binstubs_directory_path = DEFAULT_BINSTUBS_DIRECTORY_PATH.to_string();
        }
        for tool in &mut self.tools {
            tool.apply_defaults();
        }
    }

    /// The aggregator package name, if a non-blank one is set.
    pub fn package_name(&self) -> Option<&str> {
        self.aggregator_package_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
