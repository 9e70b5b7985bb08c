//! Minimal CoNLL-U reader
//!
//! Keeps only the columns the detector needs. Multi-word token ranges
//! (`3-4`) and empty nodes (`5.1`) are skipped, so token ids in a sentence
//! are the plain integer word ids.

use super::{CorpusError, CorpusResult};

/// One syntactic word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: u32,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    /// Governor id; 0 for the root or when unannotated
    pub head: u32,
    pub deprel: String,
}

impl Token {
    pub fn lower_form(&self) -> String {
        self.form.to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pub id: String,
    pub text: Option<String>,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Position in `tokens` of the word with the given id
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.tokens.iter().position(|t| t.id == id)
    }
}

fn parse_token(line: &str, line_no: usize) -> CorpusResult<Option<Token>> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < 8 {
        return Err(CorpusError::Malformed {
            line: line_no,
            message: format!("expected 10 tab-separated columns, found {}", cols.len()),
        });
    }
    if cols[0].contains('-') || cols[0].contains('.') {
        return Ok(None);
    }
    let id = cols[0].parse::<u32>().map_err(|_| CorpusError::Malformed {
        line: line_no,
        message: format!("invalid token id '{}'", cols[0]),
    })?;
    let head = match cols[6] {
        "_" => 0,
        h => h.parse::<u32>().map_err(|_| CorpusError::Malformed {
            line: line_no,
            message: format!("invalid head '{}'", h),
        })?,
    };
    Ok(Some(Token {
        id,
        form: cols[1].to_string(),
        lemma: cols[2].to_string(),
        upos: cols[3].to_string(),
        head,
        deprel: cols[7].to_string(),
    }))
}

/// Parse a whole CoNLL-U document.
///
/// Sentences without a `# sent_id` comment are numbered `s1`, `s2`, ... in
/// document order.
pub fn parse_conllu(text: &str) -> CorpusResult<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut current = Sentence::default();
    let mut open = false;

    let mut finish = |current: &mut Sentence, open: &mut bool| {
        if *open {
            let mut sent = std::mem::take(current);
            if sent.id.is_empty() {
                sent.id = format!("s{}", sentences.len() + 1);
            }
            sentences.push(sent);
        }
        *open = false;
    };

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            finish(&mut current, &mut open);
            continue;
        }
        open = true;
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if let Some(v) = comment.strip_prefix("sent_id") {
                current.id = v.trim_start().trim_start_matches('=').trim().to_string();
            } else if let Some(v) = comment.strip_prefix("text") {
                if let Some(v) = v.trim_start().strip_prefix('=') {
                    current.text = Some(v.trim().to_string());
                }
            }
            continue;
        }
        if let Some(tok) = parse_token(line, idx + 1)? {
            current.tokens.push(tok);
        }
    }
    finish(&mut current, &mut open);

    Ok(sentences)
}
