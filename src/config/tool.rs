//! Tool declarations.
//!
//! One entry of the `tools` list: which package to run, at which version,
//! under which binstub name and with which flags.

use serde::Deserialize;

use super::modifiers::resolve_modifiers;

/// Command used to run a tool from its package reference.
pub const RUNNER_COMMAND: &str = "go run";

/// Separator between a package reference and its pinned version.
pub const VERSION_SEPARATOR: &str = "@";

/// Declaration of a single tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolDeclaration {
    /// Package path of the tool, e.g. `golang.org/x/tools/cmd/stringer`.
    pub package_reference: String,

    /// Pinned version; pinned tools are kept out of the aggregator.
    pub version: Option<String>,

    /// Add an import line to the aggregator file (default true).
    pub include_in_aggregator: Option<bool>,

    /// Write a launcher script for this tool (default true).
    pub generate_binstub: Option<bool>,

    /// Launcher file name; defaults to the last segment of the package path.
    pub binstub_name: Option<String>,

    /// Flags placed between `go run` and the package reference.
    pub tool_run_modifiers: Vec<String>,

    /// Use only `tool_run_modifiers`, dropping the global ones.
    pub override_global_run_modifiers: bool,

    /// Flags appended after the package reference.
    pub binstub_modifiers: Vec<String>,
}

impl ToolDeclaration {
    /// Create a declaration for a package with every setting at its default.
    pub fn new(package_reference: impl Into<String>) -> Self {
        Self {
            package_reference: package_reference.into(),
            ..Default::default()
        }
    }

    /// Pin the tool to a version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set an explicit binstub name.
    pub fn with_binstub_name(mut self, name: impl Into<String>) -> Self {
        self.binstub_name = Some(name.into());
        self
    }

    /// Set the tool's run modifiers.
    pub fn with_run_modifiers(mut self, modifiers: Vec<String>) -> Self {
        self.tool_run_modifiers = modifiers;
        self
    }

    /// Fill in unset flags and the binstub name.
    ///
    /// Calling this more than once has no further effect.
    pub fn apply_defaults(&mut self) {
        self.include_in_aggregator.get_or_insert(true);
        self.generate_binstub.get_or_insert(true);

        if self.binstub_name.as_deref().is_none_or(str::is_empty) {
            self.binstub_name = default_binstub_name(&self.package_reference);
        }
    }

    /// True when the declaration has no package to work with.
    pub fn is_empty(&self) -> bool {
        self.package_reference.trim().is_empty()
    }

    /// The pinned version, if a non-empty one is set.
    pub fn pinned_version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }

    /// Whether this tool gets an import line in the aggregator file.
    pub fn is_aggregator_eligible(&self) -> bool {
        !self.is_empty()
            && self.include_in_aggregator.unwrap_or(true)
            && self.pinned_version().is_none()
    }

    /// Whether a launcher script is written for this tool.
    pub fn is_binstub_eligible(&self) -> bool {
        !self.is_empty() && self.generate_binstub.unwrap_or(true)
    }

    /// The launcher file name, explicit or derived from the package path.
    pub fn effective_binstub_name(&self) -> Option<String> {
        match self.binstub_name.as_deref() {
            Some(name) if !name.is_empty() => Some(name.to_string()),
            _ => default_binstub_name(&self.package_reference),
        }
    }

    /// Package reference with the pinned version appended.
    pub fn run_target(&self) -> String {
        match self.pinned_version() {
            Some(version) => format!("{}{}{}", self.package_reference, VERSION_SEPARATOR, version),
            None => self.package_reference.clone(),
        }
    }

    /// Full command line the binstub executes, without the forwarded arguments.
    pub fn run_command(&self, global_run_modifiers: &[String]) -> String {
        let modifiers = resolve_modifiers(
            global_run_modifiers,
            &self.tool_run_modifiers,
            self.override_global_run_modifiers,
        );

        let mut parts = vec![RUNNER_COMMAND.to_string()];
        parts.extend(modifiers);
        parts.push(self.run_target());
        parts.extend(self.binstub_modifiers.iter().cloned());
        parts.join(" ")
    }
}

/// Last path segment of a package reference.
fn default_binstub_name(package_reference: &str) -> Option<String> {
    package_reference
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
