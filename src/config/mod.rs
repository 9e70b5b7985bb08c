//! Configuration module for lingstat
//!
//! This module handles project-level configuration (`lingstat.toml`):
//! input and output paths, model settings and construction settings.

mod project_config;

pub use project_config::{
    default_toml, load_project_config, ConstructionConfig, InventoryConfig, ProjectConfig,
    CONFIG_FILE,
};
