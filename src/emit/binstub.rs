//! Binstub script emission.

use std::fs;
use std::path::{Path, PathBuf};

use super::{BINSTUB_MODE, generated_marker, write_file};
use crate::config::GenerationOptions;
use crate::error::{BinstubsError, Result};

/// Variable holding the directory the binstub lives in.
pub const SELF_DIR_VARIABLE: &str = "binstubAbsFilePath";

/// Render a binstub script that execs `run_command`.
pub fn render_binstub(run_command: &str) -> String {
    format!(
        "#!/usr/bin/env bash\n\
         # {marker}\n\
         \n\
         {var}=$( cd -- \"$( dirname -- \"${{BASH_SOURCE[0]}}\" )\" &> /dev/null && pwd )\n\
         \n\
         exec {run_command} \"$@\"\n",
        marker = generated_marker(),
        var = SELF_DIR_VARIABLE,
    )
}

/// Write one binstub per eligible tool into the binstubs directory under `root`.
///
/// Returns the written paths in tool order. A later tool with the same
/// binstub name overwrites the earlier script.
pub fn write_binstubs(options: &GenerationOptions, root: &Path) -> Result<Vec<PathBuf>> {
    let dir = root.join(&options.binstubs_directory_path);
    fs::create_dir_all(&dir).map_err(|e| BinstubsError::io(&dir, e))?;

    let mut written = Vec::new();
    for tool in &options.tools {
        if tool.is_empty() {
            log::warn!("Skipping tool declaration without a packageReference");
            continue;
        }
        if !tool.is_binstub_eligible() {
            log::debug!("Binstub generation disabled for {}", tool.package_reference);
            continue;
        }
        let Some(name) = tool.effective_binstub_name() else {
            log::warn!("Cannot derive a binstub name for {}", tool.package_reference);
            continue;
        };

        check_binstub_name(&name)?;
        let path = dir.join(&name);
        let script = render_binstub(&tool.run_command(&options.global_run_modifiers));
        write_file(&path, &script, Some(BINSTUB_MODE))?;

        log::info!("Wrote binstub for {} to {}", tool.package_reference, path.display());
        written.push(path);
    }

    Ok(written)
}

/// Reject names that are not a single path component.
fn check_binstub_name(name: &str) -> Result<()> {
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(BinstubsError::InvalidBinstubName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolDeclaration;
    use tempfile::tempdir;

    #[test]
    fn test_render_binstub_exact() {
        let script = render_binstub("go run -x example.com/mod/foo");
        let expected = r#"#!/usr/bin/env bash
# Code generated by gotools-binstubs. DO NOT EDIT.

binstubAbsFilePath=$( cd -- "$( dirname -- "${BASH_SOURCE[0]}" )" &> /dev/null && pwd )

exec go run -x example.com/mod/foo "$@"
"#;
        assert_eq!(script, expected);
    }

    #[test]
    fn test_write_binstubs_creates_directory() {
        let dir = tempdir().unwrap();
        let options = GenerationOptions {
            binstubs_directory_path: "tools/bin".to_string(),
            tools: vec![ToolDeclaration::new("example.com/mod/foo")],
            ..Default::default()
        };

        let written = write_binstubs(&options, dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("tools/bin/foo")]);
        let script = fs::read_to_string(&written[0]).unwrap();
        assert!(script.ends_with("exec go run example.com/mod/foo \"$@\"\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_binstubs_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let options = GenerationOptions {
            tools: vec![ToolDeclaration::new("example.com/mod/foo")],
            ..Default::default()
        };

        let written = write_binstubs(&options, dir.path()).unwrap();
        let mode = fs::metadata(&written[0]).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_write_binstubs_skips_ineligible() {
        let dir = tempdir().unwrap();
        let mut disabled = ToolDeclaration::new("example.com/mod/disabled");
        disabled.generate_binstub = Some(false);

        let options = GenerationOptions {
            tools: vec![
                disabled,
                ToolDeclaration::default(),
                ToolDeclaration::new("example.com/mod/kept"),
            ],
            ..Default::default()
        };

        let written = write_binstubs(&options, dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("bin/kept")]);
        assert!(!dir.path().join("bin/disabled").exists());
    }

    #[test]
    fn test_write_binstubs_collision_last_wins() {
        let dir = tempdir().unwrap();
        let options = GenerationOptions {
            tools: vec![
                ToolDeclaration::new("example.com/a/lint"),
                ToolDeclaration::new("example.com/b/linter").with_binstub_name("lint"),
            ],
            ..Default::default()
        };

        write_binstubs(&options, dir.path()).unwrap();

        let entries = fs::read_dir(dir.path().join("bin")).unwrap().count();
        assert_eq!(entries, 1);
        let script = fs::read_to_string(dir.path().join("bin/lint")).unwrap();
        assert!(script.contains("exec go run example.com/b/linter \"$@\""));
    }

    #[test]
    fn test_write_binstubs_directory_blocked_by_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bin"), "not a directory").unwrap();
        let options = GenerationOptions {
            tools: vec![ToolDeclaration::new("example.com/mod/foo")],
            ..Default::default()
        };

        let result = write_binstubs(&options, dir.path());
        assert!(matches!(result, Err(BinstubsError::Io { .. })));
    }

    #[test]
    fn test_write_failure_stops_remaining_binstubs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("bin/b")).unwrap();
        let options = GenerationOptions {
            tools: vec![
                ToolDeclaration::new("example.com/mod/a"),
                ToolDeclaration::new("example.com/mod/b"),
                ToolDeclaration::new("example.com/mod/c"),
            ],
            ..Default::default()
        };

        let result = write_binstubs(&options, dir.path());
        assert!(matches!(result, Err(BinstubsError::Io { .. })));
        assert!(dir.path().join("bin/a").is_file());
        assert!(!dir.path().join("bin/c").exists());
    }

    #[test]
    fn test_write_binstubs_rejects_parent_escape() {
        let dir = tempdir().unwrap();
        let options = GenerationOptions {
            tools: vec![
                ToolDeclaration::new("example.com/mod/foo").with_binstub_name("../escaped"),
            ],
            ..Default::default()
        };

        let result = write_binstubs(&options, dir.path());
        assert!(matches!(
            result,
            Err(BinstubsError::InvalidBinstubName(name)) if name == "../escaped"
        ));
        assert!(!dir.path().join("escaped").exists());
    }

    #[test]
    fn test_check_binstub_name() {
        assert!(check_binstub_name("golangci-lint").is_ok());
        assert!(check_binstub_name("lint.sh").is_ok());
        assert!(check_binstub_name("..").is_err());
        assert!(check_binstub_name(".").is_err());
        assert!(check_binstub_name("nested/lint").is_err());
        assert!(check_binstub_name("nested\\lint").is_err());
    }
}
