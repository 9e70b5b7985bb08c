//! Seeded stand-in rows for corpora that are not on disk

use crate::models::{ConstructionInstance, HeadCategory};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Corpus that gets the smaller, more licensed synthetic sample
pub const PRIMARY_CORPUS: &str = "gum";

/// (seed, rows, licensing probability) for a corpus
pub fn synthetic_profile(corpus: &str) -> (u64, usize, f64) {
    if corpus == PRIMARY_CORPUS {
        (0, 12, 0.6)
    } else {
        (1, 15, 0.55)
    }
}

/// Deterministic synthetic instances shaped like real extractions.
pub fn synthetic_instances(corpus: &str) -> Vec<ConstructionInstance> {
    let (seed, n, p_licensing) = synthetic_profile(corpus);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let categories = HeadCategory::all();

    (0..n)
        .map(|i| {
            let upos_x = categories.choose(&mut rng).copied().unwrap_or(HeadCategory::Other);
            let upos_y = categories.choose(&mut rng).copied().unwrap_or(HeadCategory::Other);
            let licensing = rng.random::<f64>() < p_licensing;
            ConstructionInstance {
                sentence_id: format!("syn-{}-{}", corpus, i),
                x_form: format!("X{}", i),
                y_form: format!("Y{}", i),
                upos_x,
                upos_y,
                parallelism: upos_x.parallel_with(upos_y),
                licensing,
                dist_x_anchor: rng.random_range(1..=3),
                dist_anchor_y: rng.random_range(1..=3),
                corpus: corpus.to_string(),
            }
        })
        .collect()
}
