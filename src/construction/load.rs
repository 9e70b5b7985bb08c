//! Corpus loading with synthetic fallback

use super::conllu::parse_conllu;
use super::detect::extract_let_alone_features;
use super::synthetic::synthetic_instances;
use super::{CorpusError, CorpusResult};
use crate::models::ConstructionInstance;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Sorted `.conllu` files directly inside `dir`; empty when `dir` is absent
pub fn conllu_files(dir: &Path) -> CorpusResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|source| CorpusError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "conllu"))
        .collect();
    files.sort();
    Ok(files)
}

/// Extract instances from every file of one corpus.
///
/// A corpus with no `.conllu` files is replaced by synthetic rows, with a
/// warning, so downstream tables can still be produced.
pub fn load_corpus_features(
    ud_dir: &Path,
    corpus: &str,
    licensors: &HashSet<String>,
) -> CorpusResult<Vec<ConstructionInstance>> {
    let base = ud_dir.join(corpus);
    let files = conllu_files(&base)?;

    if files.is_empty() {
        warn!(
            "No .conllu files found for corpus '{}' in {}; generating synthetic data",
            corpus,
            base.display()
        );
        return Ok(synthetic_instances(corpus));
    }

    let mut rows = Vec::new();
    for path in &files {
        info!("Parsing {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.clone(),
            source,
        })?;
        let sentences = parse_conllu(&text).map_err(|e| match e {
            CorpusError::Malformed { line, message } => CorpusError::Parse {
                path: path.clone(),
                line,
                message,
            },
            other => other,
        })?;
        for sentence in &sentences {
            for mut row in extract_let_alone_features(sentence, licensors) {
                row.corpus = corpus.to_string();
                rows.push(row);
            }
        }
    }
    info!("Corpus '{}': {} instances from {} files", corpus, rows.len(), files.len());
    Ok(rows)
}
