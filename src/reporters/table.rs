//! CSV table output

use crate::stats::ModelReport;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write `rows` as a headed CSV file, creating parent directories.
///
/// An empty slice still produces a file, without a header row.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

/// One grid point of the fitted curves
#[derive(Debug, Clone, Serialize)]
pub struct CurveRow {
    pub vowel_inventory_size: f64,
    pub y_mean: f64,
    pub y_lower: f64,
    pub y_upper: f64,
    pub i_pred: f64,
}

pub fn curve_rows(report: &ModelReport) -> Vec<CurveRow> {
    report
        .grid
        .iter()
        .enumerate()
        .map(|(j, &v)| CurveRow {
            vowel_inventory_size: v,
            y_mean: report.y_band.mean[j],
            y_lower: report.y_band.lower[j],
            y_upper: report.y_band.upper[j],
            i_pred: report.i_curve[j],
        })
        .collect()
}
