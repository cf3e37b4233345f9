//! CLI definitions using clap.
//!
//! The input modes are mutually exclusive:
//! - `--input`: generate from a YAML configuration document
//! - `--scan`: generate from annotations in an existing tools.go
//! - `--gentemplate`: write an example configuration document

use clap::Parser;
use std::path::PathBuf;

use crate::error::{BinstubsError, Result};

/// gotools-binstubs - Generate binstubs for Go tools
#[derive(Parser, Debug)]
#[command(name = "gotools-binstubs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Generate from a YAML configuration document
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Write an example configuration document
    #[arg(long, value_name = "PATH")]
    pub gentemplate: Option<PathBuf>,

    /// Generate from binstub annotations in an existing tools.go
    #[arg(short, long, value_name = "PATH")]
    pub scan: Option<PathBuf>,

    /// Override the binstubs directory
    #[arg(short, long, value_name = "DIR")]
    pub binstubs_dir: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the invocation asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No mode flag: print usage.
    Usage,
    Input(PathBuf),
    Scan(PathBuf),
    GenTemplate(PathBuf),
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Pick the single requested mode.
    pub fn mode(&self) -> Result<Mode> {
        let mut modes = Vec::new();
        if let Some(path) = &self.input {
            modes.push(("--input", Mode::Input(path.clone())));
        }
        if let Some(path) = &self.gentemplate {
            modes.push(("--gentemplate", Mode::GenTemplate(path.clone())));
        }
        if let Some(path) = &self.scan {
            modes.push(("--scan", Mode::Scan(path.clone())));
        }

        if modes.len() > 1 {
            let flags: Vec<&str> = modes.iter().map(|(flag, _)| *flag).collect();
            return Err(BinstubsError::UsageConflict(format!(
                "{} are mutually exclusive",
                flags.join(" and ")
            )));
        }

        Ok(modes.pop().map(|(_, mode)| mode).unwrap_or(Mode::Usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["gotools-binstubs"]).unwrap();
        assert_eq!(cli.mode().unwrap(), Mode::Usage);
        assert!(!cli.is_verbose());
        assert!(cli.binstubs_dir.is_none());
    }

    #[test]
    fn test_cli_input_mode() {
        let cli = Cli::try_parse_from(["gotools-binstubs", "--input", "binstubs.yml"]).unwrap();
        assert_eq!(cli.mode().unwrap(), Mode::Input(PathBuf::from("binstubs.yml")));
    }

    #[test]
    fn test_cli_gentemplate_mode() {
        let cli =
            Cli::try_parse_from(["gotools-binstubs", "--gentemplate", "example.yml"]).unwrap();
        assert_eq!(cli.mode().unwrap(), Mode::GenTemplate(PathBuf::from("example.yml")));
    }

    #[test]
    fn test_cli_scan_mode_with_dir() {
        let cli =
            Cli::try_parse_from(["gotools-binstubs", "-s", "tools.go", "-b", "scripts", "-v"])
                .unwrap();
        assert_eq!(cli.mode().unwrap(), Mode::Scan(PathBuf::from("tools.go")));
        assert_eq!(cli.binstubs_dir.as_deref(), Some("scripts"));
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_cli_conflicting_modes() {
        let cli = Cli::try_parse_from([
            "gotools-binstubs",
            "--input",
            "a.yml",
            "--gentemplate",
            "b.yml",
        ])
        .unwrap();
        let err = cli.mode().unwrap_err();
        assert!(matches!(err, BinstubsError::UsageConflict(_)));
        assert!(err.to_string().contains("--input and --gentemplate"));
    }

    #[test]
    fn test_cli_unknown_flag() {
        assert!(Cli::try_parse_from(["gotools-binstubs", "--nope"]).is_err());
    }

    #[test]
    fn test_help_works() {
        Cli::command().debug_assert();
    }
}
