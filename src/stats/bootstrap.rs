//! Bootstrap confidence bands for predicted probability curves

use super::logistic::{FitOptions, LogisticRegression};
use super::metrics::{mean, percentile};
use super::{StatsError, StatsResult};
use indicatif::ProgressBar;
use nalgebra::DMatrix;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

/// Lower and upper percentiles of the reported band
pub const BAND_PERCENTILES: (f64, f64) = (2.5, 97.5);

/// Pointwise summary of the resampled curves
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapBand {
    pub mean: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    /// Resamples that produced a curve
    pub used: usize,
    /// Resamples skipped for a single class or a failed fit
    pub skipped: usize,
}

/// Resample rows with replacement `n_boot` times, refit, and summarise the
/// predicted curves over `grid` (rows already in design-column order).
///
/// The band always contains the mean: when a skewed resample distribution
/// pushes the mean outside the percentile interval, the interval is
/// widened to reach it.
pub fn bootstrap_band(
    x: &DMatrix<f64>,
    targets: &[bool],
    grid: &DMatrix<f64>,
    n_boot: usize,
    seed: u64,
    options: &FitOptions,
    progress: &ProgressBar,
) -> StatsResult<BootstrapBand> {
    let n = targets.len();
    if n == 0 {
        return Err(StatsError::EmptyDesign);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut curves: Vec<Vec<f64>> = Vec::with_capacity(n_boot);
    let mut skipped = 0;

    for b in 0..n_boot {
        progress.inc(1);
        let idx: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
        let y_boot: Vec<bool> = idx.iter().map(|&i| targets[i]).collect();
        if y_boot.iter().all(|&t| t) || y_boot.iter().all(|&t| !t) {
            skipped += 1;
            continue;
        }
        match LogisticRegression::fit(&x.select_rows(&idx), &y_boot, options) {
            Ok(model) => curves.push(model.predict_proba(grid)),
            Err(e) => {
                debug!("Bootstrap resample {} skipped: {}", b + 1, e);
                skipped += 1;
            }
        }
    }

    if curves.is_empty() {
        return Err(StatsError::NoUsableResamples { attempted: n_boot });
    }

    let points = grid.nrows();
    let mut band = BootstrapBand {
        mean: Vec::with_capacity(points),
        lower: Vec::with_capacity(points),
        upper: Vec::with_capacity(points),
        used: curves.len(),
        skipped,
    };

    let mut column = Vec::with_capacity(curves.len());
    for j in 0..points {
        column.clear();
        column.extend(curves.iter().map(|c| c[j]));
        column.sort_by(|a, b| a.total_cmp(b));

        let m = mean(&column);
        band.mean.push(m);
        band.lower.push(percentile(&column, BAND_PERCENTILES.0).min(m));
        band.upper.push(percentile(&column, BAND_PERCENTILES.1).max(m));
    }

    Ok(band)
}
