//! "let alone" anchor detection and cue features

use super::conllu::{Sentence, Token};
use crate::models::{ConstructionInstance, HeadCategory};
use std::collections::HashSet;

/// Polarity and negation cues that license the construction
pub const LICENSOR_WORDS: &[&str] = &["not", "n't", "no", "never", "hardly", "without", "even"];

/// Nouns and verbs that introduce a mention of the phrase itself
const MENTION_WORDS: &[&str] = &[
    "phrase",
    "expression",
    "term",
    "word",
    "words",
    "say",
    "says",
    "said",
    "means",
    "idiom",
];

const QUOTES: &[&str] = &["\"", "'", "“", "”", "‘", "’", "«", "»", "``", "''"];

fn is_mention_word(tok: &Token) -> bool {
    MENTION_WORDS.contains(&tok.lower_form().as_str())
}

/// Tokens that may sit between a mention word and the quoted phrase
fn is_quote_bridge(tok: &Token) -> bool {
    tok.form == ":" || QUOTES.contains(&tok.form.as_str())
}

pub fn default_licensors() -> HashSet<String> {
    LICENSOR_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Positions (into `Sentence::tokens`) of one `let` + `alone` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Anchor {
    pub let_pos: usize,
    pub alone_pos: usize,
}

fn is_content(tok: &Token) -> bool {
    matches!(
        tok.upos.as_str(),
        "NOUN" | "PROPN" | "PRON" | "NUM" | "VERB" | "ADJ" | "ADV"
    )
}

fn is_let(tok: &Token) -> bool {
    tok.form.eq_ignore_ascii_case("let") || tok.lemma.eq_ignore_ascii_case("let")
}

/// All anchors in the sentence, by lexical adjacency or by a `fixed`
/// attachment of `alone` to `let`, deduplicated and in order.
pub fn find_anchors(sentence: &Sentence) -> Vec<Anchor> {
    let toks = &sentence.tokens;
    let mut anchors = Vec::new();

    for (i, pair) in toks.windows(2).enumerate() {
        if pair[0].form.eq_ignore_ascii_case("let") && pair[1].form.eq_ignore_ascii_case("alone") {
            anchors.push(Anchor {
                let_pos: i,
                alone_pos: i + 1,
            });
        }
    }

    for (j, tok) in toks.iter().enumerate() {
        if !tok.form.eq_ignore_ascii_case("alone") || !tok.deprel.starts_with("fixed") {
            continue;
        }
        if let Some(h) = sentence.position_of(tok.head) {
            if is_let(&toks[h]) {
                anchors.push(Anchor {
                    let_pos: h,
                    alone_pos: j,
                });
            }
        }
    }

    anchors.sort();
    anchors.dedup();
    anchors
}

/// True for mentions of the phrase rather than uses of it.
pub fn is_metalinguistic(sentence: &Sentence, anchor: &Anchor) -> bool {
    let toks = &sentence.tokens;
    let is_quote = |pos: usize| toks.get(pos).is_some_and(|t| QUOTES.contains(&t.form.as_str()));

    let quoted_before = anchor.let_pos > 0 && is_quote(anchor.let_pos - 1);
    if quoted_before || is_quote(anchor.alone_pos + 1) {
        return true;
    }

    // A mention word only counts when it introduces the anchor itself:
    // "the phrase let alone", "said: let alone". In "say it, let alone
    // write it" the verb has its own object.
    let introducer = toks[..anchor.let_pos]
        .iter()
        .rev()
        .find(|t| !is_quote_bridge(t));
    if introducer.is_some_and(is_mention_word) {
        return true;
    }
    if sentence
        .position_of(toks[anchor.let_pos].head)
        .is_some_and(|h| is_mention_word(&toks[h]))
    {
        return true;
    }

    !toks[anchor.alone_pos + 1..].iter().any(is_content)
}

fn resolve_y(sentence: &Sentence, anchor: &Anchor) -> Option<usize> {
    let toks = &sentence.tokens;
    let let_tok = &toks[anchor.let_pos];
    if let_tok.deprel == "cc" {
        if let Some(h) = sentence.position_of(let_tok.head) {
            if h != anchor.alone_pos {
                return Some(h);
            }
        }
    }
    (anchor.alone_pos + 1..toks.len()).find(|&p| is_content(&toks[p]))
}

fn resolve_x(
    sentence: &Sentence,
    anchor: &Anchor,
    y: usize,
    licensors: &HashSet<String>,
) -> Option<usize> {
    let toks = &sentence.tokens;
    if toks[y].deprel == "conj" {
        if let Some(h) = sentence.position_of(toks[y].head) {
            if h < anchor.let_pos {
                return Some(h);
            }
        }
    }
    (0..anchor.let_pos)
        .rev()
        .find(|&p| is_content(&toks[p]) && !licensors.contains(&toks[p].lower_form()))
}

/// Cue features for every genuine anchor in the sentence.
///
/// An anchor without any content word to its left yields an empty X form
/// with category OTHER and distance 0.
pub fn extract_let_alone_features(
    sentence: &Sentence,
    licensors: &HashSet<String>,
) -> Vec<ConstructionInstance> {
    let toks = &sentence.tokens;
    let licensing = toks.iter().any(|t| licensors.contains(&t.lower_form()));

    find_anchors(sentence)
        .into_iter()
        .filter(|a| !is_metalinguistic(sentence, a))
        .filter_map(|anchor| {
            let y = resolve_y(sentence, &anchor)?;
            let x = resolve_x(sentence, &anchor, y, licensors);

            let let_tok = &toks[anchor.let_pos];
            let alone_tok = &toks[anchor.alone_pos];
            let y_tok = &toks[y];

            let upos_y = HeadCategory::from_upos(&y_tok.upos);
            let (x_form, upos_x, dist_x_anchor) = match x {
                Some(x) => (
                    toks[x].form.clone(),
                    HeadCategory::from_upos(&toks[x].upos),
                    let_tok.id.abs_diff(toks[x].id),
                ),
                None => (String::new(), HeadCategory::Other, 0),
            };

            Some(ConstructionInstance {
                sentence_id: sentence.id.clone(),
                x_form,
                y_form: y_tok.form.clone(),
                upos_x,
                upos_y,
                parallelism: upos_x.parallel_with(upos_y),
                licensing,
                dist_x_anchor,
                dist_anchor_y: y_tok.id.abs_diff(alone_tok.id),
                corpus: String::new(),
            })
        })
        .collect()
}
