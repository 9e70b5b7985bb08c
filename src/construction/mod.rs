//! "let alone" construction extraction from UD treebanks
//!
//! Anchors are found by a lexical and a syntactic pattern, filtered for
//! metalinguistic mentions, and turned into cue features. Y-head fillers
//! are then ranked per corpus by log-likelihood collostruction.

mod collostruction;
mod conllu;
mod detect;
mod load;
mod synthetic;

pub use collostruction::{compute_collostruction, format_top, g_squared};
pub use conllu::{parse_conllu, Sentence, Token};
pub use detect::{
    default_licensors, extract_let_alone_features, find_anchors, is_metalinguistic, Anchor,
    LICENSOR_WORDS,
};
pub use load::{conllu_files, load_corpus_features};
pub use synthetic::{synthetic_instances, synthetic_profile};

use crate::models::{AssociationScore, ConstructionInstance, CorpusStats};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CoNLL-U at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("Malformed CoNLL-U in {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

pub type CorpusResult<T> = Result<T, CorpusError>;

/// Summary row for one corpus
pub fn corpus_stats(
    corpus: &str,
    instances: &[ConstructionInstance],
    ranking: &[AssociationScore],
) -> CorpusStats {
    let n = instances.len();
    let rate = |flag: fn(&ConstructionInstance) -> bool| {
        if n == 0 {
            0.0
        } else {
            instances.iter().filter(|&i| flag(i)).count() as f64 / n as f64
        }
    };
    CorpusStats {
        corpus: corpus.to_string(),
        n_tokens: n,
        parallelism_rate: rate(|i| i.parallelism),
        licensing_rate: rate(|i| i.licensing),
        top_y_heads: format_top(ranking),
    }
}

/// Everything an extraction run produces
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    #[serde(skip)]
    pub instances: Vec<ConstructionInstance>,
    pub stats: Vec<CorpusStats>,
    pub rankings: BTreeMap<String, Vec<AssociationScore>>,
}

/// Load each corpus in order, then summarise and rank.
pub fn run_extraction(
    ud_dir: &Path,
    corpora: &[String],
    licensors: &HashSet<String>,
    top_n: usize,
) -> CorpusResult<ExtractionReport> {
    let mut per_corpus = Vec::with_capacity(corpora.len());
    for corpus in corpora {
        per_corpus.push(load_corpus_features(ud_dir, corpus, licensors)?);
    }

    let instances: Vec<ConstructionInstance> = per_corpus.iter().flatten().cloned().collect();
    let rankings = compute_collostruction(&instances, top_n);

    let stats = corpora
        .iter()
        .zip(per_corpus.iter())
        .map(|(corpus, rows)| {
            let ranking = rankings.get(corpus).map(Vec::as_slice).unwrap_or(&[]);
            corpus_stats(corpus, rows, ranking)
        })
        .collect();

    Ok(ExtractionReport {
        instances,
        stats,
        rankings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_corpus_stats_rates() {
        let rows = synthetic_instances("gum");
        let s = corpus_stats("gum", &rows, &[]);
        assert_eq!(s.n_tokens, 12);
        let par = rows.iter().filter(|r| r.parallelism).count() as f64 / 12.0;
        assert!((s.parallelism_rate - par).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&s.licensing_rate));
        assert_eq!(s.top_y_heads, "");
    }

    #[test]
    fn test_empty_corpus_has_zero_rates() {
        let s = corpus_stats("x", &[], &[]);
        assert_eq!(s.n_tokens, 0);
        assert_eq!(s.parallelism_rate, 0.0);
        assert_eq!(s.licensing_rate, 0.0);
    }

    #[test]
    fn test_run_extraction_synthetic() {
        let tmp = TempDir::new().unwrap();
        let corpora = vec!["gum".to_string(), "ewt".to_string()];
        let report = run_extraction(tmp.path(), &corpora, &default_licensors(), 5).unwrap();

        assert_eq!(report.instances.len(), 27);
        assert_eq!(report.stats.len(), 2);
        assert_eq!(report.stats[0].corpus, "gum");
        assert_eq!(report.stats[0].n_tokens, 12);
        assert_eq!(report.stats[1].corpus, "ewt");
        assert_eq!(report.stats[1].n_tokens, 15);
        // y0..y11 are relatively more frequent in gum; y12..y14 only occur in ewt.
        assert_eq!(report.rankings["gum"].len(), 5);
        assert_eq!(report.rankings["ewt"].len(), 3);
        assert!(!report.stats[0].top_y_heads.is_empty());
    }
}
