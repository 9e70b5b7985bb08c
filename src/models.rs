//! Core data models for lingstat
//!
//! Records flowing through both pipelines. Everything here is rebuilt from
//! the input files on every run; nothing is updated in place.

use serde::{Deserialize, Serialize};

/// One row of the PHOIBLE phoneme table.
///
/// Only the columns the pipelines read are mapped; extra columns in the
/// CSV are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhonemeRecord {
    #[serde(rename = "Glottocode", default)]
    pub glottocode: String,
    #[serde(rename = "InventoryID", default)]
    pub inventory_id: String,
    #[serde(rename = "LanguageName", default)]
    pub language_name: String,
    #[serde(rename = "Phoneme", default)]
    pub phoneme: Option<String>,
    #[serde(rename = "SegmentClass", default)]
    pub segment_class: String,
}

/// Aggregated counts for one (language, inventory) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub glottocode: String,
    pub inventory_id: String,
    pub total_inventory_size: usize,
    pub vowel_inventory_size: usize,
    pub y_present: bool,
    pub i_present: bool,
}

/// One row of the Glottolog languoid table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguoidRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: String,
}

/// A language ready for modelling: the chosen inventory joined with
/// metadata and its centred vowel count.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageRow {
    pub glottocode: String,
    pub language_name: String,
    pub family_name: String,
    pub total_inventory_size: usize,
    pub vowel_inventory_size: usize,
    pub vowel_inv_c: f64,
    pub y_present: bool,
    pub i_present: bool,
}

/// Broad part-of-speech class of a construction head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HeadCategory {
    Noun,
    Verb,
    Adj,
    Other,
}

impl HeadCategory {
    pub fn all() -> &'static [HeadCategory] {
        &[
            HeadCategory::Noun,
            HeadCategory::Verb,
            HeadCategory::Adj,
            HeadCategory::Other,
        ]
    }

    /// Map a UD UPOS tag onto the broad taxonomy
    pub fn from_upos(upos: &str) -> Self {
        match upos {
            "NOUN" | "PROPN" | "PRON" | "NUM" => HeadCategory::Noun,
            "VERB" | "AUX" => HeadCategory::Verb,
            "ADJ" => HeadCategory::Adj,
            _ => HeadCategory::Other,
        }
    }

    /// Two heads are parallel when they share a class other than OTHER
    pub fn parallel_with(self, other: HeadCategory) -> bool {
        self == other && self != HeadCategory::Other
    }
}

impl std::fmt::Display for HeadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeadCategory::Noun => write!(f, "NOUN"),
            HeadCategory::Verb => write!(f, "VERB"),
            HeadCategory::Adj => write!(f, "ADJ"),
            HeadCategory::Other => write!(f, "OTHER"),
        }
    }
}

/// One detected "let alone" occurrence with its cue features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionInstance {
    pub sentence_id: String,
    pub x_form: String,
    pub y_form: String,
    pub upos_x: HeadCategory,
    pub upos_y: HeadCategory,
    #[serde(with = "bool_as_int")]
    pub parallelism: bool,
    #[serde(with = "bool_as_int")]
    pub licensing: bool,
    pub dist_x_anchor: u32,
    pub dist_anchor_y: u32,
    pub corpus: String,
}

/// Log-likelihood association of a Y-head form with one corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationScore {
    pub form: String,
    pub corpus: String,
    pub g_squared: f64,
}

/// Per-corpus summary row of `let_alone_stats.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub corpus: String,
    pub n_tokens: usize,
    pub parallelism_rate: f64,
    pub licensing_rate: f64,
    pub top_y_heads: String,
}

/// Flags are written as 0/1 so the tables load cleanly into R or pandas.
mod bool_as_int {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim() {
            "1" | "true" | "True" => Ok(true),
            "0" | "false" | "False" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 0/1 flag, got '{}'",
                other
            ))),
        }
    }
}
