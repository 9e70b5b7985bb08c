//! Log-likelihood collostruction ranking of Y-head fillers
//!
//! Each Y form gets a 2x2 table (this form vs. all other forms, corpus A
//! vs. corpus B) and a G² score. The form is credited to the corpus where
//! its relative frequency is higher.

use crate::models::{AssociationScore, ConstructionInstance};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

const EPSILON: f64 = 1e-12;

/// G² for the table `[[a, b], [c, d]]` (rows: corpus, columns: form vs.
/// other forms). Zero cells contribute nothing.
pub fn g_squared(a: f64, b: f64, c: f64, d: f64) -> f64 {
    let total = a + b + c + d;
    let expected = |row: f64, col: f64| if total > 0.0 { row * col / total } else { 0.0 };

    let cells = [
        (a, expected(a + b, a + c)),
        (b, expected(a + b, b + d)),
        (c, expected(c + d, a + c)),
        (d, expected(c + d, b + d)),
    ];
    2.0 * cells
        .iter()
        .filter(|(o, _)| *o > 0.0)
        .map(|(o, e)| o * ((o + EPSILON) / (e + EPSILON)).ln())
        .sum::<f64>()
}

/// Top `top_n` associated forms per corpus.
///
/// Needs exactly two corpora; with any other number every corpus present
/// maps to an empty list.
pub fn compute_collostruction(
    instances: &[ConstructionInstance],
    top_n: usize,
) -> BTreeMap<String, Vec<AssociationScore>> {
    let mut corpora: Vec<&str> = Vec::new();
    for inst in instances {
        if !corpora.contains(&inst.corpus.as_str()) {
            corpora.push(&inst.corpus);
        }
    }

    let mut result: BTreeMap<String, Vec<AssociationScore>> = corpora
        .iter()
        .map(|c| (c.to_string(), Vec::new()))
        .collect();
    if corpora.len() != 2 {
        debug!(
            "Collostruction needs two corpora, found {}; rankings left empty",
            corpora.len()
        );
        return result;
    }

    let count = |corpus: &str| {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for inst in instances.iter().filter(|i| i.corpus == corpus) {
            *counts.entry(inst.y_form.to_lowercase()).or_insert(0) += 1;
        }
        counts
    };
    let (name_a, name_b) = (corpora[0], corpora[1]);
    let counts_a = count(name_a);
    let counts_b = count(name_b);
    let total_a: u64 = counts_a.values().sum();
    let total_b: u64 = counts_b.values().sum();

    let mut forms: Vec<&String> = counts_a.keys().chain(counts_b.keys()).collect();
    forms.sort();
    forms.dedup();

    for form in forms {
        let a = counts_a.get(form).copied().unwrap_or(0);
        let c = counts_b.get(form).copied().unwrap_or(0);
        let g = g_squared(
            a as f64,
            (total_a - a) as f64,
            c as f64,
            (total_b - c) as f64,
        );

        // a/total_a vs c/total_b, compared exactly.
        let lhs = u128::from(a) * u128::from(total_b);
        let rhs = u128::from(c) * u128::from(total_a);
        let winner = match lhs.cmp(&rhs) {
            std::cmp::Ordering::Greater => name_a,
            std::cmp::Ordering::Less => name_b,
            std::cmp::Ordering::Equal => continue,
        };
        if let Some(list) = result.get_mut(winner) {
            list.push(AssociationScore {
                form: form.clone(),
                corpus: winner.to_string(),
                g_squared: g,
            });
        }
    }

    for list in result.values_mut() {
        list.sort_by(|x, y| {
            y.g_squared
                .total_cmp(&x.g_squared)
                .then_with(|| x.form.cmp(&y.form))
        });
        list.truncate(top_n);
    }
    result
}

/// `form:score` pairs with two decimals, joined by `"; "`
pub fn format_top(scores: &[AssociationScore]) -> String {
    scores
        .iter()
        .map(|s| format!("{}:{:.2}", s.form, s.g_squared))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeadCategory;

    fn inst(corpus: &str, y: &str) -> ConstructionInstance {
        ConstructionInstance {
            sentence_id: String::new(),
            x_form: String::new(),
            y_form: y.to_string(),
            upos_x: HeadCategory::Other,
            upos_y: HeadCategory::Other,
            parallelism: false,
            licensing: false,
            dist_x_anchor: 1,
            dist_anchor_y: 1,
            corpus: corpus.to_string(),
        }
    }

    fn sample() -> Vec<ConstructionInstance> {
        let mut v = Vec::new();
        for _ in 0..6 {
            v.push(inst("gum", "walk"));
        }
        for _ in 0..2 {
            v.push(inst("gum", "Run"));
        }
        v.push(inst("gum", "fly"));
        v.push(inst("ewt", "run"));
        for _ in 0..5 {
            v.push(inst("ewt", "swim"));
        }
        v.push(inst("ewt", "walk"));
        v
    }

    #[test]
    fn test_g_squared_independence_is_zero() {
        assert!(g_squared(10.0, 10.0, 10.0, 10.0).abs() < 1e-9);
        assert!(g_squared(0.0, 0.0, 0.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_g_squared_known_value() {
        // [[10, 0], [0, 10]]: 2 * 20 * ln 2
        let g = g_squared(10.0, 0.0, 0.0, 10.0);
        assert!((g - 40.0 * 2f64.ln()).abs() < 1e-6);
        assert!(g_squared(3.0, 7.0, 1.0, 9.0) > 0.0);
    }

    #[test]
    fn test_forms_credited_to_higher_relative_frequency() {
        let res = compute_collostruction(&sample(), 5);
        let gum: Vec<&str> = res["gum"].iter().map(|s| s.form.as_str()).collect();
        let ewt: Vec<&str> = res["ewt"].iter().map(|s| s.form.as_str()).collect();
        assert!(gum.contains(&"walk"));
        assert!(gum.contains(&"run"));
        assert!(gum.contains(&"fly"));
        assert_eq!(ewt, vec!["swim"]);
        assert_eq!(res["gum"][0].form, "walk");
        assert!(res["gum"].windows(2).all(|w| w[0].g_squared >= w[1].g_squared));
    }

    #[test]
    fn test_symmetric_under_corpus_order() {
        let forward = compute_collostruction(&sample(), 5);
        let mut reversed = sample();
        reversed.reverse();
        let backward = compute_collostruction(&reversed, 5);
        assert_eq!(forward.len(), 2);
        for corpus in ["gum", "ewt"] {
            assert_eq!(forward[corpus].len(), backward[corpus].len());
            for (f, b) in forward[corpus].iter().zip(backward[corpus].iter()) {
                assert_eq!(f.form, b.form);
                assert!((f.g_squared - b.g_squared).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_equal_relative_frequency_excluded() {
        // "same" is 1/3 of each corpus.
        let v = vec![
            inst("a", "same"),
            inst("a", "x"),
            inst("a", "x"),
            inst("b", "same"),
            inst("b", "same"),
            inst("b", "y"),
            inst("b", "y"),
            inst("b", "y"),
            inst("b", "y"),
        ];
        let res = compute_collostruction(&v, 5);
        assert!(res.values().flatten().all(|s| s.form != "same"));
        assert_eq!(res["a"][0].form, "x");
        assert_eq!(res["b"][0].form, "y");
    }

    #[test]
    fn test_needs_exactly_two_corpora() {
        let one = vec![inst("gum", "a"), inst("gum", "b")];
        let res = compute_collostruction(&one, 5);
        assert_eq!(res.len(), 1);
        assert!(res["gum"].is_empty());

        let three = vec![inst("a", "x"), inst("b", "x"), inst("c", "y")];
        let res = compute_collostruction(&three, 5);
        assert_eq!(res.len(), 3);
        assert!(res.values().all(|v| v.is_empty()));

        assert!(compute_collostruction(&[], 5).is_empty());
    }

    #[test]
    fn test_top_n_and_tie_order() {
        let mut v = Vec::new();
        for form in ["e", "d", "c", "b", "a", "f"] {
            v.push(inst("gum", form));
        }
        for _ in 0..6 {
            v.push(inst("ewt", "z"));
        }
        let res = compute_collostruction(&v, 5);
        let gum: Vec<&str> = res["gum"].iter().map(|s| s.form.as_str()).collect();
        assert_eq!(gum, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_format_top() {
        let scores = vec![
            AssociationScore {
                form: "walk".into(),
                corpus: "gum".into(),
                g_squared: 3.14159,
            },
            AssociationScore {
                form: "run".into(),
                corpus: "gum".into(),
                g_squared: 1.005,
            },
        ];
        let s = format_top(&scores);
        assert!(s.starts_with("walk:3.14; run:1."));
        assert_eq!(format_top(&[]), "");
    }
}
