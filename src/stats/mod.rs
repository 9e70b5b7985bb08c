//! Logistic models of vowel presence
//!
//! Fits /y/ and /i/ presence against centred vowel inventory size plus
//! family indicators, evaluates the /y/ model with stratified
//! cross-validated AUC and summarises bootstrap refits as a confidence
//! band over a grid of vowel sizes.

mod bootstrap;
mod cv;
mod design;
mod logistic;
mod metrics;

pub use bootstrap::{bootstrap_band, BootstrapBand, BAND_PERCENTILES};
pub use cv::{cross_validated_auc, stratified_folds, CvResult};
pub use design::{linspace, DesignMatrix, VOWEL_COLUMN};
pub use logistic::{FitOptions, LogisticRegression};
pub use metrics::{mean, percentile, roc_auc};

use crate::models::LanguageRow;
use indicatif::ProgressBar;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Errors from model fitting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Design matrix has no rows")]
    EmptyDesign,

    #[error("Shape mismatch: expected {expected} targets, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Targets contain a single class; cannot fit a binary model")]
    SingleClass,

    #[error("Normal equations are singular")]
    Singular,

    #[error("Coefficients diverged to non-finite values")]
    Diverged,

    #[error("None of {attempted} bootstrap resamples contained both classes")]
    NoUsableResamples { attempted: usize },
}

pub type StatsResult<T> = Result<T, StatsError>;

/// Fewest folds that leave every fold a training complement
pub const MIN_FOLDS: usize = 2;
pub const MIN_RESAMPLES: usize = 1;
/// A curve needs both ends of the vowel range
pub const MIN_GRID_POINTS: usize = 2;

/// Knobs for a full model run
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub seed: u64,
    pub folds: usize,
    pub n_boot: usize,
    pub grid_points: usize,
    pub fit: FitOptions,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            seed: 20250101,
            folds: 10,
            n_boot: 200,
            grid_points: 100,
            fit: FitOptions::default(),
        }
    }
}

/// One fitted coefficient with its column name
#[derive(Debug, Clone, Serialize)]
pub struct NamedCoefficient {
    pub term: String,
    pub estimate: f64,
}

/// Everything a model run produces
#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    pub n_languages: usize,
    pub y_present: usize,
    pub i_present: usize,
    pub reference_family: Option<String>,
    pub modal_family: Option<String>,
    pub vowel_mean: f64,
    pub cv: CvResult,
    pub y_coefficients: Vec<NamedCoefficient>,
    pub i_coefficients: Vec<NamedCoefficient>,
    pub grid: Vec<f64>,
    pub y_band: BootstrapBand,
    pub i_curve: Vec<f64>,
}

fn named(design: &DesignMatrix, model: &LogisticRegression) -> Vec<NamedCoefficient> {
    std::iter::once(NamedCoefficient {
        term: "(Intercept)".to_string(),
        estimate: model.intercept,
    })
    .chain(
        design
            .columns()
            .iter()
            .zip(model.coefficients.iter())
            .map(|(term, &estimate)| NamedCoefficient {
                term: term.clone(),
                estimate,
            }),
    )
    .collect()
}

/// Fit both models, cross-validate /y/ and bootstrap its curve.
pub fn run_models(
    rows: &[LanguageRow],
    settings: &ModelSettings,
    progress: &ProgressBar,
) -> StatsResult<ModelReport> {
    let design = DesignMatrix::from_rows(rows);
    let y: Vec<bool> = rows.iter().map(|r| r.y_present).collect();
    let i: Vec<bool> = rows.iter().map(|r| r.i_present).collect();

    info!("Fitting logistic regression for /y/ and /i/");
    let model_y = LogisticRegression::fit(design.matrix(), &y, &settings.fit)?;
    let model_i = LogisticRegression::fit(design.matrix(), &i, &settings.fit)?;

    info!("Computing {}-fold cross-validated AUC", settings.folds);
    let cv = cross_validated_auc(design.matrix(), &y, settings.folds, settings.seed, &settings.fit);
    info!("Mean {}-fold CV AUC for /y/: {:.3}", settings.folds, cv.mean_auc);

    let vmin = rows
        .iter()
        .map(|r| r.vowel_inventory_size)
        .min()
        .unwrap_or(0) as f64;
    let vmax = rows
        .iter()
        .map(|r| r.vowel_inventory_size)
        .max()
        .unwrap_or(0) as f64;
    let grid = linspace(vmin, vmax, settings.grid_points);
    let grid_x = design.grid_rows(&grid);

    info!("Bootstrapping /y/ curve ({} resamples)", settings.n_boot);
    let y_band = bootstrap_band(
        design.matrix(),
        &y,
        &grid_x,
        settings.n_boot,
        settings.seed,
        &settings.fit,
        progress,
    )?;
    let i_curve = model_i.predict_proba(&grid_x);

    Ok(ModelReport {
        n_languages: rows.len(),
        y_present: y.iter().filter(|t| **t).count(),
        i_present: i.iter().filter(|t| **t).count(),
        reference_family: design.reference_family().map(str::to_string),
        modal_family: crate::inventory::modal_family(rows),
        vowel_mean: design.vowel_mean(),
        cv,
        y_coefficients: named(&design, &model_y),
        i_coefficients: named(&design, &model_i),
        grid,
        y_band,
        i_curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_rows() -> Vec<LanguageRow> {
        let families = ["Atlantic", "Bantu", "Celtic"];
        let mut rows = Vec::new();
        for k in 0..90 {
            let vowels = 3 + k % 12;
            // /y/ grows likelier with inventory size; /i/ is near-universal.
            let y_present = vowels >= 9 && k % 5 != 0 || vowels == 6 && k % 4 == 0;
            rows.push(LanguageRow {
                glottocode: format!("lang{:04}", k),
                language_name: format!("Language {}", k),
                family_name: families[k % 3].to_string(),
                total_inventory_size: vowels + 20,
                vowel_inventory_size: vowels,
                vowel_inv_c: 0.0,
                y_present,
                i_present: k % 9 != 0,
            });
        }
        let m = rows.iter().map(|r| r.vowel_inventory_size as f64).sum::<f64>() / rows.len() as f64;
        for r in rows.iter_mut() {
            r.vowel_inv_c = r.vowel_inventory_size as f64 - m;
        }
        rows
    }

    #[test]
    fn test_run_models_end_to_end() {
        let rows = synthetic_rows();
        let settings = ModelSettings {
            n_boot: 40,
            grid_points: 20,
            ..Default::default()
        };
        let report = run_models(&rows, &settings, &ProgressBar::hidden()).unwrap();

        assert_eq!(report.n_languages, 90);
        assert_eq!(report.grid.len(), 20);
        assert_eq!(report.grid[0], 3.0);
        assert_eq!(report.grid[19], 14.0);
        assert_eq!(report.i_curve.len(), 20);
        assert_eq!(report.reference_family.as_deref(), Some("Atlantic"));
        assert_eq!(report.y_coefficients[0].term, "(Intercept)");
        assert_eq!(report.y_coefficients[1].term, VOWEL_COLUMN);
        assert_eq!(report.y_coefficients.len(), 4);
        assert!(report.y_coefficients[1].estimate > 0.0);
        assert!(report.cv.mean_auc > 0.5 && report.cv.mean_auc <= 1.0);
        for j in 0..20 {
            assert!(report.y_band.lower[j] <= report.y_band.mean[j]);
            assert!(report.y_band.mean[j] <= report.y_band.upper[j]);
        }
    }

    #[test]
    fn test_single_class_target_is_error() {
        let mut rows = synthetic_rows();
        for r in rows.iter_mut() {
            r.y_present = false;
        }
        let err = run_models(&rows, &ModelSettings::default(), &ProgressBar::hidden()).unwrap_err();
        assert_eq!(err, StatsError::SingleClass);
    }
}
