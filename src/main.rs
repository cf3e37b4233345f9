use clap::{CommandFactory, Parser};
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use gotools_binstubs::cli::{Cli, Mode};
use gotools_binstubs::config::TEMPLATE_YAML;
use gotools_binstubs::{BinstubsError, GenerationOptions, Generator, Outcome, scan};

const EXIT_USAGE: u8 = 1;
const EXIT_GENERATION: u8 = 2;

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn run_application(cli: &Cli) -> Result<()> {
    match cli.mode()? {
        Mode::Usage => {
            Cli::command().print_help().context("Failed to print usage")?;
            Ok(())
        }
        Mode::GenTemplate(path) => handle_gentemplate(&path),
        Mode::Input(path) => {
            let options = GenerationOptions::load(&path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            run_generation(options, cli)
        }
        Mode::Scan(path) => {
            let options = scan::scan_file(&path)
                .with_context(|| format!("Failed to scan {}", path.display()))?;
            run_generation(options, cli)
        }
    }
}

fn handle_gentemplate(path: &Path) -> Result<()> {
    info!("Writing configuration template to {}", path.display());
    fs::write(path, TEMPLATE_YAML)
        .map_err(|e| BinstubsError::io(path, e))
        .context("Failed to write template")?;
    eprintln!("{} {}", "Wrote template:".green(), path.display());
    Ok(())
}

fn run_generation(options: GenerationOptions, cli: &Cli) -> Result<()> {
    let mut generator = Generator::new(options);
    if let Some(dir) = &cli.binstubs_dir {
        generator = generator.with_binstubs_dir(dir.clone());
    }

    match generator.run().context("Generation failed")? {
        Outcome::NoOp => {
            eprintln!("{}", "No tools declared, nothing to generate".yellow());
        }
        Outcome::Success { aggregator, binstubs } => {
            if let Some(path) = aggregator {
                eprintln!("{} {}", "Wrote aggregator:".green(), path.display());
            }
            for path in binstubs {
                eprintln!("{} {}", "Wrote binstub:".green(), path.display());
            }
        }
    }
    Ok(())
}

/// Usage conflicts exit 1, every other failure exits 2.
fn exit_code(err: &eyre::Report) -> u8 {
    match err.downcast_ref::<BinstubsError>() {
        Some(BinstubsError::UsageConflict(_)) => EXIT_USAGE,
        _ => EXIT_GENERATION,
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures.
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    setup_logging(cli.is_verbose());

    match run_application(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {} {}", "caused by:".red(), cause);
            }
            ExitCode::from(exit_code(&e))
        }
    }
}
