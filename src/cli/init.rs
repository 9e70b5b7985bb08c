//! Init command - set up a project directory

use super::project_root;
use crate::config::{default_toml, CONFIG_FILE};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Directories the pipelines read from and write to
const PROJECT_DIRS: &[&str] = &["data/raw", "data/ud", "figs", "out"];

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let root = project_root(path)?;

    println!("\n{} Initializing lingstat project\n", style("▸").bold());

    for dir in PROJECT_DIRS {
        let full = root.join(dir);
        if full.exists() {
            println!("{} Exists  {}", style("✓").green(), style(dir).dim());
        } else {
            std::fs::create_dir_all(&full)
                .with_context(|| format!("Failed to create {}", full.display()))?;
            println!("{} Created {}", style("✓").green(), style(dir).cyan());
        }
    }

    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() {
        println!(
            "{} Kept existing {}",
            style("✓").green(),
            style(CONFIG_FILE).cyan()
        );
    } else {
        std::fs::write(&config_path, default_toml())
            .with_context(|| format!("Failed to create {}", config_path.display()))?;
        println!("{} Created {}", style("✓").green(), style(CONFIG_FILE).cyan());
    }

    println!(
        "\nNext: place phoible.csv and languoid.csv in {} and UD corpora under {}",
        style("data/raw").cyan(),
        style("data/ud/<corpus>").cyan()
    );
    Ok(())
}
