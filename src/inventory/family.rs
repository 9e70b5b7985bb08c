//! Language → family mapping from the Glottolog languoid table

use crate::models::LanguoidRecord;
use std::collections::HashMap;

/// Family name for languages without a mapped top-level family
pub const UNKNOWN_FAMILY: &str = "(Unknown)";

/// Map every languoid id to the name of its top-level family.
///
/// Family-level languoids are looked up by `family_id`. Languoids whose
/// `family_id` is empty or names no family row get [`UNKNOWN_FAMILY`];
/// this includes the family rows themselves, whose `family_id` is empty.
pub fn compute_family_mapping(languoids: &[LanguoidRecord]) -> HashMap<String, String> {
    let families: HashMap<&str, &str> = languoids
        .iter()
        .filter(|l| l.level.trim() == "family")
        .map(|l| (l.id.trim(), l.name.trim()))
        .collect();

    languoids
        .iter()
        .filter(|l| !l.id.trim().is_empty())
        .map(|l| {
            let family = families
                .get(l.family_id.trim())
                .map(|name| name.to_string())
                .unwrap_or_else(|| UNKNOWN_FAMILY.to_string());
            (l.id.trim().to_string(), family)
        })
        .collect()
}

/// Resolve a glottocode against a mapping, falling back to the sentinel
pub fn family_for<'a>(mapping: &'a HashMap<String, String>, glottocode: &str) -> &'a str {
    mapping
        .get(glottocode)
        .map(String::as_str)
        .unwrap_or(UNKNOWN_FAMILY)
}
