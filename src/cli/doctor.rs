//! Doctor command - check project inputs

use super::project_root;
use crate::config::{load_project_config, ProjectConfig, CONFIG_FILE};
use crate::construction::conllu_files;
use anyhow::Result;
use console::style;
use std::path::Path;

pub fn run(path: &Path) -> Result<()> {
    let root = project_root(path)?;
    println!("{} lingstat doctor\n", style("▸").bold());

    if root.join(CONFIG_FILE).exists() {
        println!("{} Config: {}", style("✓").green(), CONFIG_FILE);
    } else {
        println!("○ Config: none (defaults in use; run `lingstat init`)");
    }
    let config = load_project_config(&root);

    let mut model_ready = true;
    for (label, rel) in [
        ("PHOIBLE table", &config.inventory.phoible),
        ("Languoid table", &config.inventory.languoid),
    ] {
        let full = ProjectConfig::resolve(&root, rel);
        if full.is_file() {
            println!("{} {}: {}", style("✓").green(), label, rel.display());
        } else {
            model_ready = false;
            println!("{} {}: missing ({})", style("✗").red(), label, rel.display());
        }
    }

    let ud_dir = ProjectConfig::resolve(&root, &config.construction.ud_dir);
    let mut synthetic = Vec::new();
    for corpus in &config.construction.corpora {
        let files = conllu_files(&ud_dir.join(corpus))?;
        if files.is_empty() {
            synthetic.push(corpus.as_str());
            println!(
                "○ Corpus {}: no .conllu files (synthetic data will be used)",
                corpus
            );
        } else {
            println!(
                "{} Corpus {}: {} .conllu file(s)",
                style("✓").green(),
                corpus,
                files.len()
            );
        }
    }

    println!();
    if model_ready {
        println!("{} `lingstat model` can run", style("✓").green());
    } else {
        println!(
            "{} `lingstat model` needs the missing tables above",
            style("✗").red()
        );
    }
    if synthetic.is_empty() {
        println!("{} `lingstat extract` will use real corpora", style("✓").green());
    } else {
        println!(
            "○ `lingstat extract` will use synthetic data for: {}",
            synthetic.join(", ")
        );
    }
    Ok(())
}
