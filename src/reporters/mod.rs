//! Output reporters for lingstat runs
//!
//! Terminal summaries come in two formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//!
//! Files on disk are always written the same way: CSV tables through
//! [`table`], the probability figure through [`svg`] (with PNG and PDF
//! copies from [`figure`]), and the model summary as JSON.

pub mod figure;
mod json;
pub mod svg;
pub mod table;
mod text;

use crate::construction::ExtractionReport;
use crate::stats::ModelReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a model run summary
pub fn render_model(report: &ModelReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_model(report)),
        OutputFormat::Json => json::render(report),
    }
}

/// Render an extraction run summary
pub fn render_extraction(report: &ExtractionReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_extraction(report)),
        OutputFormat::Json => json::render(report),
    }
}

/// Pretty JSON for files on disk, stamped with time and version
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    json::render_stamped(value)
}
