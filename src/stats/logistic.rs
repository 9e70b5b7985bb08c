//! Binary logistic regression fitted by Newton-Raphson (IRLS)
//!
//! The intercept is always estimated and never penalised. An optional L2
//! penalty on the slopes keeps estimates finite when a family indicator
//! separates the classes perfectly; with `ridge = 0` the fit is plain
//! maximum likelihood.

use super::{StatsError, StatsResult};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use tracing::debug;

/// Fitting options
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    /// L2 penalty strength on slopes (inverse of the usual `C`)
    pub ridge: f64,
    /// Maximum Newton iterations
    pub max_iter: usize,
    /// Convergence threshold on the largest coefficient change
    pub tol: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            ridge: 1.0,
            max_iter: 100,
            tol: 1e-8,
        }
    }
}

/// A fitted model: intercept plus one slope per design column
#[derive(Debug, Clone, Serialize)]
pub struct LogisticRegression {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// ln(1 + e^z) without overflow
fn log1p_exp(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

/// Prepend a column of ones
fn with_intercept(x: &DMatrix<f64>) -> DMatrix<f64> {
    x.clone().insert_column(0, 1.0)
}

/// Penalised log-likelihood at `beta` (first entry is the intercept)
fn objective(xa: &DMatrix<f64>, y: &DVector<f64>, beta: &DVector<f64>, ridge: f64) -> f64 {
    let eta = xa * beta;
    let ll: f64 = eta
        .iter()
        .zip(y.iter())
        .map(|(&z, &t)| t * z - log1p_exp(z))
        .sum();
    let penalty: f64 = beta.iter().skip(1).map(|b| b * b).sum::<f64>() * ridge / 2.0;
    ll - penalty
}

impl LogisticRegression {
    /// Fit on a design matrix (without intercept column) and 0/1 targets.
    pub fn fit(x: &DMatrix<f64>, targets: &[bool], options: &FitOptions) -> StatsResult<Self> {
        let n = x.nrows();
        if n == 0 {
            return Err(StatsError::EmptyDesign);
        }
        if targets.len() != n {
            return Err(StatsError::ShapeMismatch {
                expected: n,
                got: targets.len(),
            });
        }
        let positives = targets.iter().filter(|t| **t).count();
        if positives == 0 || positives == n {
            return Err(StatsError::SingleClass);
        }

        let xa = with_intercept(x);
        let p = xa.ncols();
        let y = DVector::from_iterator(n, targets.iter().map(|&t| if t { 1.0 } else { 0.0 }));

        let mut beta = DVector::<f64>::zeros(p);
        let mut current = objective(&xa, &y, &beta, options.ridge);
        let mut converged = false;
        let mut iterations = 0;

        for iter in 0..options.max_iter {
            iterations = iter + 1;
            let eta = &xa * &beta;
            let mu = eta.map(sigmoid);
            let w = mu.map(|m| m * (1.0 - m));

            let mut penalty = DVector::<f64>::from_element(p, options.ridge);
            penalty[0] = 0.0;

            let mut gradient = xa.transpose() * (&y - &mu);
            gradient -= penalty.component_mul(&beta);

            let mut xw = xa.clone();
            for (i, mut row) in xw.row_iter_mut().enumerate() {
                row *= w[i];
            }
            let mut hessian = xa.transpose() * &xw;
            for j in 0..p {
                hessian[(j, j)] += penalty[j];
            }

            let step = match hessian.clone().cholesky() {
                Some(chol) => chol.solve(&gradient),
                None => hessian.lu().solve(&gradient).ok_or(StatsError::Singular)?,
            };

            // Halve the step until the objective stops getting worse.
            let mut scale = 1.0;
            let mut candidate = &beta + &step;
            let mut value = objective(&xa, &y, &candidate, options.ridge);
            while value < current && scale > 1e-6 {
                scale /= 2.0;
                candidate = &beta + &step * scale;
                value = objective(&xa, &y, &candidate, options.ridge);
            }

            let change = (&step * scale).amax();
            beta = candidate;
            current = value;

            if !beta.iter().all(|b| b.is_finite()) {
                return Err(StatsError::Diverged);
            }
            if change < options.tol {
                converged = true;
                break;
            }
        }

        if !converged {
            debug!(
                "Logistic fit stopped after {} iterations without converging",
                iterations
            );
        }

        Ok(Self {
            intercept: beta[0],
            coefficients: beta.iter().skip(1).copied().collect(),
            iterations,
            converged,
        })
    }

    /// Linear predictor for each row
    pub fn decision_function(&self, x: &DMatrix<f64>) -> Vec<f64> {
        x.row_iter()
            .map(|row| {
                self.intercept
                    + row
                        .iter()
                        .zip(self.coefficients.iter())
                        .map(|(v, b)| v * b)
                        .sum::<f64>()
            })
            .collect()
    }

    /// Probability of the positive class for each row
    pub fn predict_proba(&self, x: &DMatrix<f64>) -> Vec<f64> {
        self.decision_function(x).into_iter().map(sigmoid).collect()
    }
}
