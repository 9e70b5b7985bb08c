//! Ranking metrics and percentiles

/// Area under the ROC curve via the Mann-Whitney rank statistic.
///
/// Tied scores get their average rank. Returns `None` unless both classes
/// are present.
pub fn roc_auc(labels: &[bool], scores: &[f64]) -> Option<f64> {
    if labels.len() != scores.len() {
        return None;
    }
    let n_pos = labels.iter().filter(|l| **l).count();
    let n_neg = labels.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // Ranks are 1-based; the tie block i..=j shares their mean.
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = avg;
        }
        i = j + 1;
    }

    let pos_rank_sum: f64 = labels
        .iter()
        .zip(ranks.iter())
        .filter(|(l, _)| **l)
        .map(|(_, r)| *r)
        .sum();
    let n_pos = n_pos as f64;
    let u = pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0;
    Some(u / (n_pos * n_neg as f64))
}

/// Percentile with linear interpolation between order statistics.
///
/// `sorted` must be ascending. Returns NaN for an empty slice.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = (pct / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_and_inverted_ranking() {
        let labels = [false, false, true, true];
        assert_eq!(roc_auc(&labels, &[0.1, 0.2, 0.8, 0.9]), Some(1.0));
        assert_eq!(roc_auc(&labels, &[0.9, 0.8, 0.2, 0.1]), Some(0.0));
    }

    #[test]
    fn test_ties_count_half() {
        let labels = [false, true];
        assert_eq!(roc_auc(&labels, &[0.5, 0.5]), Some(0.5));

        let labels = [false, true, false, true];
        let auc = roc_auc(&labels, &[0.1, 0.4, 0.4, 0.9]).unwrap();
        // Pairs: (0.4 vs 0.1)=1, (0.4 vs 0.4)=0.5, (0.9 vs 0.1)=1, (0.9 vs 0.4)=1
        assert!((auc - 3.5 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_is_none() {
        assert_eq!(roc_auc(&[true, true], &[0.1, 0.2]), None);
        assert_eq!(roc_auc(&[], &[]), None);
        assert_eq!(roc_auc(&[true, false], &[0.1]), None);
    }

    #[test]
    fn test_auc_bounded() {
        let labels = [true, false, true, false, false, true, true];
        let scores = [0.3, 0.3, 0.9, 0.1, 0.7, 0.2, 0.3];
        let auc = roc_auc(&labels, &scores).unwrap();
        assert!((0.0..=1.0).contains(&auc));
    }

    #[test]
    fn test_percentile_interpolates() {
        let v: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        assert_eq!(percentile(&v, 50.0), 5.0);
        assert!((percentile(&v, 2.5) - 0.25).abs() < 1e-12);
        assert!((percentile(&v, 97.5) - 9.75).abs() < 1e-12);
        assert_eq!(percentile(&v, 0.0), 0.0);
        assert_eq!(percentile(&v, 100.0), 10.0);
        assert_eq!(percentile(&[4.0], 97.5), 4.0);
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
    }
}
