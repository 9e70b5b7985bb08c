//! Stratified k-fold cross-validation

use super::logistic::{FitOptions, LogisticRegression};
use super::metrics::{mean, roc_auc};
use nalgebra::DMatrix;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

/// Assign every row to one of `k` folds, preserving class balance.
///
/// Each class is shuffled with the seeded RNG and dealt round-robin, the
/// second class continuing where the first stopped so fold sizes differ by
/// at most one.
pub fn stratified_folds(targets: &[bool], k: usize, seed: u64) -> Vec<usize> {
    let mut fold_of = vec![0; targets.len()];
    if k == 0 {
        return fold_of;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut negatives: Vec<usize> = (0..targets.len()).filter(|&i| !targets[i]).collect();
    let mut positives: Vec<usize> = (0..targets.len()).filter(|&i| targets[i]).collect();
    negatives.shuffle(&mut rng);
    positives.shuffle(&mut rng);

    for (slot, idx) in negatives.into_iter().chain(positives).enumerate() {
        fold_of[idx] = slot % k;
    }
    fold_of
}

/// Outcome of a cross-validation run
#[derive(Debug, Clone, Serialize)]
pub struct CvResult {
    /// Mean AUC over contributing folds; NaN when none contributed
    pub mean_auc: f64,
    /// AUC of each contributing fold, in fold order
    pub fold_aucs: Vec<f64>,
    /// Folds dropped for lacking both classes
    pub skipped_folds: usize,
}

impl CvResult {
    /// Number of folds attempted
    pub fn folds(&self) -> usize {
        self.fold_aucs.len() + self.skipped_folds
    }
}

/// Mean out-of-fold AUC of the logistic model.
///
/// A fold counts only when both its training and test parts contain both
/// classes; other folds are skipped rather than failing the run.
pub fn cross_validated_auc(
    x: &DMatrix<f64>,
    targets: &[bool],
    k: usize,
    seed: u64,
    options: &FitOptions,
) -> CvResult {
    let fold_of = stratified_folds(targets, k, seed);
    let mut fold_aucs = Vec::new();
    let mut skipped_folds = 0;

    for fold in 0..k {
        let (test_idx, train_idx): (Vec<usize>, Vec<usize>) =
            (0..targets.len()).partition(|&i| fold_of[i] == fold);

        let y_test: Vec<bool> = test_idx.iter().map(|&i| targets[i]).collect();
        let y_train: Vec<bool> = train_idx.iter().map(|&i| targets[i]).collect();

        let model = match LogisticRegression::fit(&x.select_rows(&train_idx), &y_train, options) {
            Ok(m) => m,
            Err(e) => {
                debug!("Fold {}: skipped ({})", fold + 1, e);
                skipped_folds += 1;
                continue;
            }
        };
        let scores = model.predict_proba(&x.select_rows(&test_idx));

        match roc_auc(&y_test, &scores) {
            Some(auc) => fold_aucs.push(auc),
            None => {
                debug!("Fold {}: skipped (single class in test set)", fold + 1);
                skipped_folds += 1;
            }
        }
    }

    CvResult {
        mean_auc: mean(&fold_aucs),
        fold_aucs,
        skipped_folds,
    }
}
