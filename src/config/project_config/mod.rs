//! Project-level configuration support
//!
//! Loads per-project configuration from `lingstat.toml` in the project
//! root. Every key is optional; anything left out keeps its default.
//!
//! # Configuration Format
//!
//! ```toml
//! # lingstat.toml
//!
//! [inventory]
//! phoible = "data/raw/phoible.csv"
//! languoid = "data/raw/languoid.csv"
//! seed = 20250101
//! folds = 10
//! n_boot = 200
//!
//! [construction]
//! ud_dir = "data/ud"
//! corpora = ["gum", "ewt"]
//! top_n = 5
//! ```

use crate::construction::LICENSOR_WORDS;
use crate::stats::{FitOptions, ModelSettings, MIN_FOLDS, MIN_GRID_POINTS, MIN_RESAMPLES};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the configuration file in the project root
pub const CONFIG_FILE: &str = "lingstat.toml";

/// Inventory-model pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub phoible: PathBuf,
    pub languoid: PathBuf,
    pub figure: PathBuf,
    pub curve_table: PathBuf,
    pub summary: PathBuf,
    pub seed: u64,
    pub folds: usize,
    pub n_boot: usize,
    pub grid_points: usize,
    /// L2 penalty on slopes; 0 disables it
    pub ridge: f64,
    pub max_iter: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        let model = ModelSettings::default();
        Self {
            phoible: PathBuf::from("data/raw/phoible.csv"),
            languoid: PathBuf::from("data/raw/languoid.csv"),
            figure: PathBuf::from("figs/y_vs_vowel_inventory.svg"),
            curve_table: PathBuf::from("out/y_vs_vowel_inventory.csv"),
            summary: PathBuf::from("out/model_y_summary.json"),
            seed: model.seed,
            folds: model.folds,
            n_boot: model.n_boot,
            grid_points: model.grid_points,
            ridge: model.fit.ridge,
            max_iter: model.fit.max_iter,
        }
    }
}

/// Raise `value` to `min`, warning when it was below
fn at_least(key: &str, value: usize, min: usize) -> usize {
    if value < min {
        warn!(
            "{}: inventory.{} = {} is below the minimum; using {}",
            CONFIG_FILE, key, value, min
        );
        min
    } else {
        value
    }
}

impl InventoryConfig {
    /// Clamp counts the model cannot run with up to their minimums
    pub fn clamp_counts(&mut self) {
        self.folds = at_least("folds", self.folds, MIN_FOLDS);
        self.n_boot = at_least("n_boot", self.n_boot, MIN_RESAMPLES);
        self.grid_points = at_least("grid_points", self.grid_points, MIN_GRID_POINTS);
        self.max_iter = at_least("max_iter", self.max_iter, 1);
        if !(self.ridge.is_finite() && self.ridge >= 0.0) {
            warn!(
                "{}: inventory.ridge = {} is not a non-negative number; using {}",
                CONFIG_FILE,
                self.ridge,
                FitOptions::default().ridge
            );
            self.ridge = FitOptions::default().ridge;
        }
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            seed: self.seed,
            folds: self.folds,
            n_boot: self.n_boot,
            grid_points: self.grid_points,
            fit: FitOptions {
                ridge: self.ridge,
                max_iter: self.max_iter,
                ..FitOptions::default()
            },
        }
    }
}

/// Construction-extraction pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    pub ud_dir: PathBuf,
    pub features: PathBuf,
    pub stats: PathBuf,
    pub corpora: Vec<String>,
    pub licensors: Vec<String>,
    pub top_n: usize,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            ud_dir: PathBuf::from("data/ud"),
            features: PathBuf::from("out/let_alone_features.csv"),
            stats: PathBuf::from("out/let_alone_stats.csv"),
            corpora: vec!["gum".to_string(), "ewt".to_string()],
            licensors: LICENSOR_WORDS.iter().map(|w| w.to_string()).collect(),
            top_n: 5,
        }
    }
}

impl ConstructionConfig {
    /// Licensor words, lowercased
    pub fn licensor_set(&self) -> HashSet<String> {
        self.licensors.iter().map(|w| w.to_lowercase()).collect()
    }
}

/// Complete project configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub inventory: InventoryConfig,
    pub construction: ConstructionConfig,
}

impl ProjectConfig {
    /// Resolve a configured path against the project root
    pub fn resolve(root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }

    /// The effective configuration as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load project configuration from the project root.
///
/// A missing file yields defaults. A file that cannot be read or parsed is
/// reported as a warning and also yields defaults.
pub fn load_project_config(project_root: &Path) -> ProjectConfig {
    let toml_path = project_root.join(CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let mut config: ProjectConfig = toml::from_str(&content)?;
    config.inventory.clamp_counts();
    Ok(config)
}

/// Commented starter file written by `lingstat init`
pub fn default_toml() -> String {
    format!(
        r#"# lingstat configuration
# Paths are relative to the project root.

[inventory]
# PHOIBLE phoneme table and Glottolog languoid table
phoible = "data/raw/phoible.csv"
languoid = "data/raw/languoid.csv"
figure = "figs/y_vs_vowel_inventory.svg"
curve_table = "out/y_vs_vowel_inventory.csv"
summary = "out/model_y_summary.json"
seed = {seed}
folds = {folds}
n_boot = {n_boot}
grid_points = {grid_points}
# L2 penalty on slopes (0 = plain maximum likelihood)
ridge = {ridge:.1}
max_iter = {max_iter}

[construction]
# One sub-directory of .conllu files per corpus
ud_dir = "data/ud"
features = "out/let_alone_features.csv"
stats = "out/let_alone_stats.csv"
corpora = ["gum", "ewt"]
licensors = [{licensors}]
top_n = 5
"#,
        seed = InventoryConfig::default().seed,
        folds = InventoryConfig::default().folds,
        n_boot = InventoryConfig::default().n_boot,
        grid_points = InventoryConfig::default().grid_points,
        ridge = InventoryConfig::default().ridge,
        max_iter = InventoryConfig::default().max_iter,
        licensors = LICENSOR_WORDS
            .iter()
            .map(|w| format!("\"{}\"", w))
            .collect::<Vec<_>>()
            .join(", "),
    )
}
