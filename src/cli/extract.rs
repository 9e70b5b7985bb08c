//! Extract command - "let alone" features and corpus statistics

use super::project_root;
use crate::config::{load_project_config, ProjectConfig};
use crate::construction::run_extraction;
use crate::reporters::{self, table, OutputFormat};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn run(path: &Path, corpora: Vec<String>, format: OutputFormat) -> Result<()> {
    let root = project_root(path)?;
    let mut config = load_project_config(&root).construction;
    if !corpora.is_empty() {
        config.corpora = corpora;
    }

    let ud_dir = ProjectConfig::resolve(&root, &config.ud_dir);
    let report = run_extraction(&ud_dir, &config.corpora, &config.licensor_set(), config.top_n)
        .context("Construction extraction failed")?;

    let features = ProjectConfig::resolve(&root, &config.features);
    table::write_table(&features, &report.instances)?;
    let stats = ProjectConfig::resolve(&root, &config.stats);
    table::write_table(&stats, &report.stats)?;

    println!("{}", reporters::render_extraction(&report, format)?);
    if format == OutputFormat::Text {
        for written in [&features, &stats] {
            println!("{} Saved {}", style("✓").green(), style(written.display()).cyan());
        }
    }
    Ok(())
}
