//! Per-inventory counts and presence flags

use super::normalize::normalize_phoneme;
use crate::models::{InventorySummary, PhonemeRecord};
use std::collections::{HashMap, HashSet};

/// Canonical symbols of the two target vowels
pub const TARGET_Y: &str = "y";
pub const TARGET_I: &str = "i";

struct InventoryAccumulator {
    glottocode: String,
    inventory_id: String,
    symbols: HashSet<String>,
    vowels: HashSet<String>,
}

/// Compute inventory sizes and /y/, /i/ presence per (language, inventory).
///
/// Rows without a glottocode cannot be attributed to a language and are
/// skipped. Empty normalised symbols are not counted. Output follows the
/// order in which each (glottocode, inventory id) pair is first seen.
pub fn compute_inventory_flags(records: &[PhonemeRecord]) -> Vec<InventorySummary> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<InventoryAccumulator> = Vec::new();

    for rec in records {
        let glottocode = rec.glottocode.trim();
        if glottocode.is_empty() {
            continue;
        }
        let key = (glottocode.to_string(), rec.inventory_id.trim().to_string());
        let slot = *index.entry(key).or_insert_with_key(|(glottocode, inventory_id)| {
            groups.push(InventoryAccumulator {
                glottocode: glottocode.clone(),
                inventory_id: inventory_id.clone(),
                symbols: HashSet::new(),
                vowels: HashSet::new(),
            });
            groups.len() - 1
        });
        let acc = &mut groups[slot];
        let symbol = normalize_phoneme(rec.phoneme.as_deref());
        if symbol.is_empty() {
            continue;
        }
        if rec.segment_class.trim() == "vowel" {
            acc.vowels.insert(symbol.clone());
        }
        acc.symbols.insert(symbol);
    }

    groups
        .into_iter()
        .map(|acc| InventorySummary {
            y_present: acc.symbols.contains(TARGET_Y),
            i_present: acc.symbols.contains(TARGET_I),
            glottocode: acc.glottocode,
            inventory_id: acc.inventory_id,
            total_inventory_size: acc.symbols.len(),
            vowel_inventory_size: acc.vowels.len(),
        })
        .collect()
}

/// Keep one inventory per language: the largest by total size, then by
/// vowel count, then the one earliest in `summaries`.
pub fn select_largest_inventory(summaries: &[InventorySummary]) -> Vec<InventorySummary> {
    let mut sorted: Vec<&InventorySummary> = summaries.iter().collect();
    // Stable sort keeps input order among full ties.
    sorted.sort_by(|a, b| {
        a.glottocode
            .cmp(&b.glottocode)
            .then(b.total_inventory_size.cmp(&a.total_inventory_size))
            .then(b.vowel_inventory_size.cmp(&a.vowel_inventory_size))
    });

    let mut out: Vec<InventorySummary> = Vec::new();
    for s in sorted {
        if out.last().map(|last| last.glottocode == s.glottocode) == Some(true) {
            continue;
        }
        out.push(s.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(glotto: &str, inv: &str, phoneme: &str, class: &str) -> PhonemeRecord {
        PhonemeRecord {
            glottocode: glotto.into(),
            inventory_id: inv.into(),
            language_name: format!("Lang {}", glotto),
            phoneme: if phoneme.is_empty() {
                None
            } else {
                Some(phoneme.into())
            },
            segment_class: class.into(),
        }
    }

    fn summary(glotto: &str, inv: &str, total: usize, vowels: usize) -> InventorySummary {
        InventorySummary {
            glottocode: glotto.into(),
            inventory_id: inv.into(),
            total_inventory_size: total,
            vowel_inventory_size: vowels,
            y_present: false,
            i_present: false,
        }
    }

    #[test]
    fn test_counts_unique_normalised_symbols() {
        let records = vec![
            rec("abcd1234", "1", "a", "vowel"),
            rec("abcd1234", "1", "aː", "vowel"),
            rec("abcd1234", "1", "y", "vowel"),
            rec("abcd1234", "1", "p", "consonant"),
            rec("abcd1234", "1", "", "consonant"),
        ];
        let out = compute_inventory_flags(&records);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].total_inventory_size, 3);
        assert_eq!(out[0].vowel_inventory_size, 2);
        assert!(out[0].y_present);
        assert!(!out[0].i_present);
    }

    #[test]
    fn test_target_match_is_exact_on_canonical_symbol() {
        let records = vec![
            rec("abcd1234", "1", "ˈiː", "vowel"),
            rec("abcd1234", "1", "yi", "vowel"),
        ];
        let out = compute_inventory_flags(&records);
        assert!(out[0].i_present);
        assert!(!out[0].y_present);
    }

    #[test]
    fn test_rows_without_glottocode_skipped() {
        let records = vec![rec("", "1", "y", "vowel"), rec("  ", "2", "i", "vowel")];
        assert!(compute_inventory_flags(&records).is_empty());
    }

    #[test]
    fn test_groups_by_language_and_inventory() {
        let records = vec![
            rec("aaaa1111", "1", "a", "vowel"),
            rec("aaaa1111", "2", "a", "vowel"),
            rec("aaaa1111", "2", "e", "vowel"),
            rec("bbbb2222", "3", "o", "vowel"),
        ];
        let out = compute_inventory_flags(&records);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].inventory_id, "2");
        assert_eq!(out[1].vowel_inventory_size, 2);
    }

    #[test]
    fn test_select_prefers_total_then_vowels_then_first() {
        let summaries = vec![
            summary("l1", "a", 30, 5),
            summary("l1", "b", 32, 4),
            summary("l2", "c", 20, 6),
            summary("l2", "d", 20, 7),
            summary("l3", "e", 10, 3),
            summary("l3", "f", 10, 3),
        ];
        let out = select_largest_inventory(&summaries);
        let chosen: Vec<&str> = out.iter().map(|s| s.inventory_id.as_str()).collect();
        assert_eq!(chosen, vec!["b", "d", "e"]);
    }

    #[test]
    fn test_select_one_row_per_language_with_max_total() {
        let summaries = vec![
            summary("zz", "1", 12, 4),
            summary("aa", "2", 40, 9),
            summary("zz", "3", 50, 4),
            summary("aa", "4", 41, 2),
            summary("mm", "5", 7, 7),
        ];
        let out = select_largest_inventory(&summaries);
        assert_eq!(out.len(), 3);
        for row in &out {
            let max_total = summaries
                .iter()
                .filter(|s| s.glottocode == row.glottocode)
                .map(|s| s.total_inventory_size)
                .max()
                .unwrap();
            assert_eq!(row.total_inventory_size, max_total);
        }
        let codes: Vec<&str> = out.iter().map(|s| s.glottocode.as_str()).collect();
        assert_eq!(codes, vec!["aa", "mm", "zz"]);
    }

    #[test]
    fn test_language_with_two_inventories_picks_eight_vowels() {
        let mut records = Vec::new();
        for v in ["a", "e", "i", "o", "u"] {
            records.push(rec("lang0001", "small", v, "vowel"));
        }
        for v in ["a", "e", "i", "o", "u", "y", "ø", "ɛ"] {
            records.push(rec("lang0001", "large", v, "vowel"));
        }
        records.push(rec("othr0002", "x", "a", "vowel"));

        let largest = select_largest_inventory(&compute_inventory_flags(&records));
        let l = largest.iter().find(|s| s.glottocode == "lang0001").unwrap();
        assert_eq!(l.inventory_id, "large");
        assert_eq!(l.vowel_inventory_size, 8);
        assert!(l.y_present);
    }

    #[test]
    fn test_full_tie_keeps_first_inventory_in_file_order() {
        let records = vec![
            rec("tied0001", "9", "a", "vowel"),
            rec("tied0001", "9", "y", "vowel"),
            rec("tied0001", "10", "a", "vowel"),
            rec("tied0001", "10", "i", "vowel"),
        ];
        let flags = compute_inventory_flags(&records);
        let ids: Vec<&str> = flags.iter().map(|s| s.inventory_id.as_str()).collect();
        assert_eq!(ids, vec!["9", "10"]);

        let chosen = select_largest_inventory(&flags);
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].inventory_id, "9");
        assert!(chosen[0].y_present);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_inventory_flags(&[]).is_empty());
        assert!(select_largest_inventory(&[]).is_empty());
    }
}
