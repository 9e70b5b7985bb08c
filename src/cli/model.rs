//! Model command - inventory preparation, model fitting and the figure

use super::{create_bar_style, project_root};
use crate::config::{load_project_config, ProjectConfig};
use crate::inventory::{check_inputs, prepare_dataset};
use crate::reporters::{self, figure, svg, table, OutputFormat};
use crate::stats::run_models;
use anyhow::{Context, Result};
use console::style;
use indicatif::ProgressBar;
use std::fs;
use std::path::Path;
use tracing::info;

fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn run(
    path: &Path,
    n_boot: Option<usize>,
    folds: Option<usize>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let root = project_root(path)?;
    let mut config = load_project_config(&root).inventory;
    if let Some(n) = n_boot {
        config.n_boot = n;
    }
    if let Some(k) = folds {
        config.folds = k;
    }
    if let Some(s) = seed {
        config.seed = s;
    }

    let phoible = ProjectConfig::resolve(&root, &config.phoible);
    let languoid = ProjectConfig::resolve(&root, &config.languoid);
    check_inputs(&phoible, &languoid)?;

    let rows = prepare_dataset(&phoible, &languoid)?;
    let settings = config.model_settings();

    let quiet_mode = format == OutputFormat::Json;
    let progress = if quiet_mode {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(settings.n_boot as u64);
        bar.set_style(create_bar_style());
        bar.set_message("Bootstrapping /y/ curve");
        bar
    };
    let report = run_models(&rows, &settings, &progress).context("Model fitting failed")?;
    progress.finish_and_clear();

    let figure_svg = ProjectConfig::resolve(&root, &config.figure);
    let document = svg::render_figure(&report, &rows);
    write_file(&figure_svg, &document)?;
    let figure_png = figure_svg.with_extension("png");
    write_file(&figure_png, figure::render_png(&document, figure::PNG_DPI)?)?;
    let figure_pdf = figure_svg.with_extension("pdf");
    write_file(&figure_pdf, figure::render_pdf(&document)?)?;
    info!(
        "Probability plot saved to {} (+ .png, .pdf)",
        figure_svg.display()
    );

    let curve = ProjectConfig::resolve(&root, &config.curve_table);
    table::write_table(&curve, &table::curve_rows(&report))?;

    let summary = ProjectConfig::resolve(&root, &config.summary);
    write_file(&summary, &reporters::to_json(&report)?)?;

    println!("{}", reporters::render_model(&report, format)?);
    if !quiet_mode {
        for written in [&figure_svg, &figure_png, &figure_pdf, &curve, &summary] {
            println!("{} Saved {}", style("✓").green(), style(written.display()).cyan());
        }
    }
    Ok(())
}
