//! Aggregator file emission.
//!
//! The aggregator is a Go source file whose only content is blank imports,
//! so `go mod tidy` keeps the listed tools as module dependencies.

use std::path::{Path, PathBuf};

use super::{generated_marker, write_file};
use crate::config::GenerationOptions;
use crate::error::{BinstubsError, Result};

/// Render the aggregator source for `options`.
///
/// Fails with [`BinstubsError::MissingPackageName`] when no package name is set.
pub fn render_aggregator(options: &GenerationOptions) -> Result<String> {
    let package_name = options.package_name().ok_or(BinstubsError::MissingPackageName)?;

    let mut out = format!("// {}\n\n", generated_marker());

    if !options.build_constraint_tags.is_empty() {
        out.push_str(&format!("//go:build {}\n\n", options.build_constraint_tags.join(" && ")));
    }

    out.push_str(&format!("package {}\n", package_name));

    let imports: Vec<&str> = options
        .tools
        .iter()
        .filter(|tool| tool.is_aggregator_eligible())
        .map(|tool| tool.package_reference.as_str())
        .collect();

    if !imports.is_empty() {
        out.push_str("\nimport (\n");
        for import in imports {
            out.push_str(&format!("\t_ \"{}\"\n", import));
        }
        out.push_str(")\n");
    }

    Ok(out)
}

/// Write the aggregator file under `root`, returning its path.
pub fn write_aggregator(options: &GenerationOptions, root: &Path) -> Result<PathBuf> {
    let content = render_aggregator(options)?;
    let path = root.join(&options.aggregator_file_path);

    write_file(&path, &content, None)?;
    log::info!("Wrote aggregator file to {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolDeclaration;
    use std::fs;
    use tempfile::tempdir;

    fn options_with(tools: Vec<ToolDeclaration>) -> GenerationOptions {
        GenerationOptions {
            aggregator_package_name: Some("tools".to_string()),
            tools,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_full_layout() {
        let mut options = options_with(vec![
            ToolDeclaration::new("golang.org/x/tools/cmd/stringer"),
            ToolDeclaration::new("github.com/golang/mock/mockgen"),
        ]);
        options.build_constraint_tags = vec!["tools".to_string(), "!windows".to_string()];

        let expected = "// Code generated by gotools-binstubs. DO NOT EDIT.\n\
                        \n\
                        //go:build tools && !windows\n\
                        \n\
                        package tools\n\
                        \n\
                        import (\n\
                        \t_ \"golang.org/x/tools/cmd/stringer\"\n\
                        \t_ \"github.com/golang/mock/mockgen\"\n\
                        )\n";
        assert_eq!(render_aggregator(&options).unwrap(), expected);
    }

    #[test]
    fn test_render_without_build_tags() {
        let options = options_with(vec![ToolDeclaration::new("example.com/mod/foo")]);
        let content = render_aggregator(&options).unwrap();
        assert!(!content.contains("//go:build"));
        assert!(content.contains("package tools\n"));
        assert!(content.contains("\t_ \"example.com/mod/foo\"\n"));
    }

    #[test]
    fn test_render_missing_package_name() {
        let mut options = options_with(vec![ToolDeclaration::new("example.com/mod/foo")]);
        options.aggregator_package_name = None;
        assert!(matches!(render_aggregator(&options), Err(BinstubsError::MissingPackageName)));
    }

    #[test]
    fn test_render_skips_ineligible_tools() {
        let mut opted_out = ToolDeclaration::new("example.com/mod/opted-out");
        opted_out.include_in_aggregator = Some(false);

        let options = options_with(vec![
            ToolDeclaration::new("example.com/mod/pinned").with_version("v1.2.3"),
            opted_out,
            ToolDeclaration::default(),
            ToolDeclaration::new("example.com/mod/kept"),
        ]);

        let content = render_aggregator(&options).unwrap();
        assert!(!content.contains("pinned"));
        assert!(!content.contains("opted-out"));
        assert!(!content.contains("_ \"\""));
        assert!(content.contains("example.com/mod/kept"));
    }

    #[test]
    fn test_render_keeps_duplicates() {
        let options = options_with(vec![
            ToolDeclaration::new("example.com/mod/foo"),
            ToolDeclaration::new("example.com/mod/foo"),
        ]);
        let content = render_aggregator(&options).unwrap();
        assert_eq!(content.matches("_ \"example.com/mod/foo\"").count(), 2);
    }

    #[test]
    fn test_render_no_eligible_tools_omits_import_block() {
        let options =
            options_with(vec![ToolDeclaration::new("example.com/mod/foo").with_version("v1.0.0")]);
        let content = render_aggregator(&options).unwrap();
        assert!(content.ends_with("package tools\n"));
        assert!(!content.contains("import"));
    }

    #[test]
    fn test_write_aggregator() {
        let dir = tempdir().unwrap();
        let options = options_with(vec![ToolDeclaration::new("example.com/mod/foo")]);

        let path = write_aggregator(&options, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("tools.go"));
        assert_eq!(fs::read_to_string(&path).unwrap(), render_aggregator(&options).unwrap());
    }

    #[test]
    fn test_write_aggregator_missing_parent() {
        let dir = tempdir().unwrap();
        let mut options = options_with(vec![ToolDeclaration::new("example.com/mod/foo")]);
        options.aggregator_file_path = "no/such/dir/tools.go".to_string();

        let result = write_aggregator(&options, dir.path());
        assert!(matches!(result, Err(BinstubsError::Io { .. })));
    }
}
