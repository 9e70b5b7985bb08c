//! CLI command definitions and handlers

mod doctor;
mod extract;
mod init;
mod model;

use crate::config::{load_project_config, CONFIG_FILE};
use crate::reporters::OutputFormat;
use crate::stats::{MIN_FOLDS, MIN_RESAMPLES};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use indicatif::ProgressStyle;
use std::path::{Path, PathBuf};

/// Parse and validate a fold count (at least 2)
fn parse_folds(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < MIN_FOLDS {
        Err(format!("folds must be at least {}", MIN_FOLDS))
    } else {
        Ok(n)
    }
}

/// Parse a count that must be at least 1
fn parse_positive(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < MIN_RESAMPLES {
        Err(format!("value must be at least {}", MIN_RESAMPLES))
    } else {
        Ok(n)
    }
}

/// lingstat - Typological models and construction extraction
///
/// Two reproducible research pipelines over flat files: a logistic model of
/// /y/ presence against vowel inventory size, and "let alone" extraction
/// from UD treebanks.
#[derive(Parser, Debug)]
#[command(name = "lingstat")]
#[command(
    version,
    about = "Vowel inventory models and \"let alone\" construction extraction",
    after_help = "\
Examples:
  lingstat init                        Create lingstat.toml and data directories
  lingstat model                       Fit the /y/ model and draw the figure
  lingstat model --n-boot 1000         More bootstrap resamples
  lingstat extract --corpus gum        Extract from one corpus only
  lingstat doctor                      Check which inputs are present"
)]
pub struct Cli {
    /// Path to project root (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create lingstat.toml and the data/output directories
    Init,

    /// Fit /y/ and /i/ models, cross-validate, bootstrap and plot
    #[command(after_help = "\
Examples:
  lingstat model                       Defaults from lingstat.toml
  lingstat model --seed 7 --folds 5    Override seed and fold count
  lingstat model --format json         JSON summary on stdout")]
    Model {
        /// Bootstrap resamples for the /y/ confidence band
        #[arg(long, value_parser = parse_positive)]
        n_boot: Option<usize>,

        /// Cross-validation folds
        #[arg(long, value_parser = parse_folds)]
        folds: Option<usize>,

        /// Random seed for folds and resampling
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Extract "let alone" instances and corpus statistics
    Extract {
        /// Corpus to process (repeatable; default from lingstat.toml)
        #[arg(long = "corpus")]
        corpora: Vec<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Check inputs and report which corpora fall back to synthetic data
    Doctor,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration as TOML
    Show,
}

/// Bar style for the bootstrap loop
pub(crate) fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .expect("valid template")
        .progress_chars("█▓▒░  ")
}

/// Canonical project root, which must be an existing directory
pub(crate) fn project_root(path: &Path) -> Result<PathBuf> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }
    Ok(root)
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => init::run(&cli.path),

        Some(Commands::Model {
            n_boot,
            folds,
            seed,
            format,
        }) => {
            let format: OutputFormat = format.parse()?;
            model::run(&cli.path, n_boot, folds, seed, format)
        }

        Some(Commands::Extract { corpora, format }) => {
            let format: OutputFormat = format.parse()?;
            extract::run(&cli.path, corpora, format)
        }

        Some(Commands::Doctor) => doctor::run(&cli.path),

        Some(Commands::Config { action }) => run_config_action(&cli.path, action),

        Some(Commands::Version) => {
            println!("lingstat {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn run_config_action(path: &Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let root = project_root(path)?;
            let config_path = root.join(CONFIG_FILE);
            if config_path.exists() {
                println!("# Loaded from {}", config_path.display());
            } else {
                println!("# No {} found; showing defaults", CONFIG_FILE);
            }
            let config = load_project_config(&root);
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
