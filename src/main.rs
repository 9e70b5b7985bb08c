//! lingstat - Computational linguistics research pipelines
//!
//! Two reproducible batch pipelines over flat files: a logistic model of
//! /y/ presence against vowel inventory size (PHOIBLE + Glottolog), and
//! extraction of the "let alone" construction from UD treebanks with a
//! collostruction ranking of its fillers.

// Allow dead code for public API methods exposed for library users
#![allow(dead_code)]

mod cli;
pub mod config;
pub mod construction;
pub mod inventory;
pub mod models;
mod reporters;
pub mod stats;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lingstat={}", cli.log_level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
