//! Annotation scanning of an existing `tools.go`.
//!
//! Reads anonymous imports and their trailing `binstub:"..."` comments,
//! plus one optional `// binstubsArgs:"..."` line, and turns them into
//! [`GenerationOptions`] for the same generator the YAML input feeds.
//!
//! ```text
//! // binstubsArgs:"-mod=mod"
//! import (
//!     _ "golang.org/x/tools/cmd/stringer"
//!     _ "github.com/golangci/golangci-lint/cmd/golangci-lint" // binstub:"lint,-tags=tools"
//!     _ "github.com/golang/mock/mockgen" // binstub:"-"
//! )
//! ```

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::config::{GenerationOptions, ToolDeclaration};
use crate::error::{BinstubsError, Result};

pub use self::tag::{Tag, find_tag, parse_tags};

mod tag;

/// Tag key for per-import options.
pub const BINSTUB_TAG: &str = "binstub";

/// Tag key for the global run modifiers line.
pub const GLOBAL_ARGS_TAG: &str = "binstubsArgs";

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s+_\s"([^"]+)"\s*/?/?\s*(.*)"#).expect("import pattern is valid")
});

static GLOBAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//\s*(binstubsArgs:.*)").expect("global pattern is valid"));

/// Options parsed from one import's trailing comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentOption {
    /// `binstub:"-"` was given.
    pub ignore: bool,
    pub name: Option<String>,
    pub run_modifiers: Vec<String>,
}

impl CommentOption {
    /// Parse the text following an import. The last `binstub` tag wins.
    pub fn parse(comment: &str) -> Result<Self> {
        let tags = parse_tags(comment.trim())?;
        let Some(tag) = find_tag(&tags, BINSTUB_TAG) else {
            return Ok(Self::default());
        };

        if tag.name == "-" && tag.options.is_empty() {
            return Ok(Self {
                ignore: true,
                ..Default::default()
            });
        }

        Ok(Self {
            ignore: false,
            name: Some(tag.name.clone()).filter(|name| !name.is_empty()),
            run_modifiers: tag.options.clone(),
        })
    }

    fn into_declaration(self, package_reference: &str) -> ToolDeclaration {
        ToolDeclaration {
            package_reference: package_reference.to_string(),
            include_in_aggregator: Some(true),
            generate_binstub: Some(!self.ignore),
            binstub_name: self.name,
            tool_run_modifiers: self.run_modifiers,
            ..Default::default()
        }
    }
}

/// Parse the `binstubsArgs` annotation into individual modifiers.
pub fn parse_global_args(annotation: &str) -> Result<Vec<String>> {
    let tags = parse_tags(annotation.trim())?;
    let tag = find_tag(&tags, GLOBAL_ARGS_TAG).ok_or_else(|| {
        BinstubsError::MalformedAnnotation(format!(
            "missing {} tag in `{}`",
            GLOBAL_ARGS_TAG, annotation
        ))
    })?;

    Ok(std::iter::once(&tag.name)
        .chain(&tag.options)
        .flat_map(|piece| piece.split_whitespace())
        .map(str::to_string)
        .collect())
}

/// Scan `tools.go` source text.
///
/// The scanned file is the aggregator itself, so the returned options
/// never ask for it to be written again.
pub fn scan_source(content: &str) -> Result<GenerationOptions> {
    let mut global_run_modifiers = Vec::new();
    for line in content.lines() {
        if let Some(caps) = GLOBAL_RE.captures(line) {
            global_run_modifiers = parse_global_args(&caps[1])?;
        }
    }

    let mut tools = Vec::new();
    for line in content.lines() {
        if let Some(caps) = IMPORT_RE.captures(line) {
            let package_reference = &caps[1];
            let option = CommentOption::parse(&caps[2])?;
            log::debug!("Found import {} ({:?})", package_reference, option);
            tools.push(option.into_declaration(package_reference));
        }
    }

    Ok(GenerationOptions {
        tools,
        global_run_modifiers,
        emit_aggregator_file: false,
        ..Default::default()
    })
}

/// Scan a `tools.go` file on disk.
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<GenerationOptions> {
    let content = fs::read_to_string(&path).map_err(|e| BinstubsError::io(&path, e))?;
    let mut options = scan_source(&content)?;
    if options.tools.is_empty() {
        log::warn!("No imports found in {}", path.as_ref().display());
    }
    options.aggregator_file_path = path.as_ref().display().to_string();
    Ok(options)
}
