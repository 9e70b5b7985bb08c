//! Design matrices for the inventory models

use crate::models::LanguageRow;
use nalgebra::DMatrix;

/// Name of the continuous covariate column
pub const VOWEL_COLUMN: &str = "vowel_inv_c";

/// Covariates for a set of languages: centred vowel size followed by one
/// indicator per non-reference family.
///
/// Families are sorted and the first is the reference level, which has no
/// column of its own. Rows built later for prediction reuse the same
/// column order with every indicator set to zero.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    columns: Vec<String>,
    reference_family: Option<String>,
    vowel_mean: f64,
    x: DMatrix<f64>,
}

impl DesignMatrix {
    pub fn from_rows(rows: &[LanguageRow]) -> Self {
        let mut families: Vec<&str> = rows.iter().map(|r| r.family_name.as_str()).collect();
        families.sort_unstable();
        families.dedup();

        let reference_family = families.first().map(|f| f.to_string());
        let dummies: Vec<&str> = families.iter().skip(1).copied().collect();

        let mut columns = Vec::with_capacity(dummies.len() + 1);
        columns.push(VOWEL_COLUMN.to_string());
        columns.extend(dummies.iter().map(|f| f.to_string()));

        let vowel_mean = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|r| r.vowel_inventory_size as f64).sum::<f64>() / rows.len() as f64
        };

        let x = DMatrix::from_fn(rows.len(), columns.len(), |i, j| {
            if j == 0 {
                rows[i].vowel_inv_c
            } else if rows[i].family_name == dummies[j - 1] {
                1.0
            } else {
                0.0
            }
        });

        Self {
            columns,
            reference_family,
            vowel_mean,
            x,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn reference_family(&self) -> Option<&str> {
        self.reference_family.as_deref()
    }

    /// Mean raw vowel count used for centring
    pub fn vowel_mean(&self) -> f64 {
        self.vowel_mean
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.x
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    /// Subset of rows, in the given order (duplicates allowed)
    pub fn select_rows(&self, idx: &[usize]) -> DMatrix<f64> {
        self.x.select_rows(idx)
    }

    /// Prediction rows for raw vowel sizes, reference family everywhere
    pub fn grid_rows(&self, vowel_sizes: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(vowel_sizes.len(), self.columns.len(), |i, j| {
            if j == 0 {
                vowel_sizes[i] - self.vowel_mean
            } else {
                0.0
            }
        })
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
