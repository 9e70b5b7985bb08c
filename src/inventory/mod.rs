//! Phoneme inventory data preparation
//!
//! Loads the PHOIBLE phoneme table and the Glottolog languoid table,
//! derives one inventory per language and joins family metadata. The
//! result is the modelling table consumed by [`crate::stats`].

mod family;
mod features;
mod normalize;

pub use family::{compute_family_mapping, family_for, UNKNOWN_FAMILY};
pub use features::{compute_inventory_flags, select_largest_inventory, TARGET_I, TARGET_Y};
pub use normalize::{normalize_phoneme, STRIPPED_MARKS};

use crate::models::{LanguageRow, LanguoidRecord, PhonemeRecord};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while preparing the inventory table
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Required input missing: {}. {hint}", path.display())]
    MissingInput { path: PathBuf, hint: String },

    #[error("Failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("No languages with phoneme inventories found in {}", path.display())]
    Empty { path: PathBuf },
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Check both inputs exist before any parsing starts.
pub fn check_inputs(phoible: &Path, languoid: &Path) -> InventoryResult<()> {
    for path in [phoible, languoid] {
        if !path.is_file() {
            return Err(InventoryError::MissingInput {
                path: path.to_path_buf(),
                hint: "Download PHOIBLE and Glottolog tables into data/raw first".to_string(),
            });
        }
    }
    Ok(())
}

/// Read every row of a headed CSV file into `T`.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> InventoryResult<Vec<T>> {
    let csv_err = |source| InventoryError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_err)?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load both tables and build the modelling table.
pub fn prepare_dataset(phoible: &Path, languoid: &Path) -> InventoryResult<Vec<LanguageRow>> {
    check_inputs(phoible, languoid)?;
    let phonemes: Vec<PhonemeRecord> = read_csv(phoible)?;
    let languoids: Vec<LanguoidRecord> = read_csv(languoid)?;
    let rows = build_language_rows(&phonemes, &languoids);
    if rows.is_empty() {
        return Err(InventoryError::Empty {
            path: phoible.to_path_buf(),
        });
    }
    info!(
        "Prepared {} languages from {} phoneme rows",
        rows.len(),
        phonemes.len()
    );
    Ok(rows)
}

/// Join the chosen inventories with names and families and centre the
/// vowel count on its sample mean.
pub fn build_language_rows(
    phonemes: &[PhonemeRecord],
    languoids: &[LanguoidRecord],
) -> Vec<LanguageRow> {
    let largest = select_largest_inventory(&compute_inventory_flags(phonemes));

    // First name seen per glottocode; PHOIBLE sometimes lists several.
    let mut names: HashMap<&str, &str> = HashMap::new();
    for rec in phonemes {
        names
            .entry(rec.glottocode.trim())
            .or_insert(rec.language_name.trim());
    }
    let families = compute_family_mapping(languoids);

    let mean_vowels = if largest.is_empty() {
        0.0
    } else {
        largest
            .iter()
            .map(|s| s.vowel_inventory_size as f64)
            .sum::<f64>()
            / largest.len() as f64
    };

    largest
        .into_iter()
        .map(|s| LanguageRow {
            language_name: names
                .get(s.glottocode.as_str())
                .map(|n| n.to_string())
                .unwrap_or_default(),
            family_name: family_for(&families, &s.glottocode).to_string(),
            total_inventory_size: s.total_inventory_size,
            vowel_inventory_size: s.vowel_inventory_size,
            vowel_inv_c: s.vowel_inventory_size as f64 - mean_vowels,
            y_present: s.y_present,
            i_present: s.i_present,
            glottocode: s.glottocode,
        })
        .collect()
}

/// Most frequent family in the table (ties go to the alphabetically first)
pub fn modal_family(rows: &[LanguageRow]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in rows {
        *counts.entry(r.family_name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
        .map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PHOIBLE: &str = "InventoryID,Glottocode,LanguageName,Phoneme,SegmentClass,Marginal\n\
1,fren1241,French,a,vowel,FALSE\n\
1,fren1241,French,y,vowel,FALSE\n\
1,fren1241,French,i,vowel,FALSE\n\
1,fren1241,French,p,consonant,FALSE\n\
2,basq1248,Basque,a,vowel,FALSE\n\
2,basq1248,Basque,i,vowel,FALSE\n\
2,basq1248,Basque,e,vowel,FALSE\n\
3,,Unattributed,y,vowel,FALSE\n";

    const LANGUOID: &str = "id,family_id,parent_id,name,bookkeeping,level\n\
indo1319,,,Indo-European,False,family\n\
fren1241,indo1319,ital1284,French,False,language\n\
basq1248,,,Basque,False,language\n";

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_prepare_dataset_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let phoible = write(dir.path(), "phoible.csv", PHOIBLE);
        let languoid = write(dir.path(), "languoid.csv", LANGUOID);

        let rows = prepare_dataset(&phoible, &languoid).unwrap();
        assert_eq!(rows.len(), 2);

        let basque = &rows[0];
        assert_eq!(basque.glottocode, "basq1248");
        assert_eq!(basque.family_name, UNKNOWN_FAMILY);
        assert_eq!(basque.vowel_inventory_size, 3);
        assert!(!basque.y_present);

        let french = &rows[1];
        assert_eq!(french.language_name, "French");
        assert_eq!(french.family_name, "Indo-European");
        assert!(french.y_present && french.i_present);
        assert_eq!(french.total_inventory_size, 4);

        let centred_sum: f64 = rows.iter().map(|r| r.vowel_inv_c).sum();
        assert!(centred_sum.abs() < 1e-12);
    }

    #[test]
    fn test_missing_input_fails_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let phoible = write(dir.path(), "phoible.csv", PHOIBLE);
        let missing = dir.path().join("languoid.csv");

        let err = prepare_dataset(&phoible, &missing).unwrap_err();
        assert!(matches!(err, InventoryError::MissingInput { .. }));
        assert!(err.to_string().contains("languoid.csv"));
    }

    #[test]
    fn test_header_only_table_is_empty_error() {
        let dir = tempfile::tempdir().unwrap();
        let phoible = write(
            dir.path(),
            "phoible.csv",
            "InventoryID,Glottocode,LanguageName,Phoneme,SegmentClass\n",
        );
        let languoid = write(dir.path(), "languoid.csv", LANGUOID);
        let err = prepare_dataset(&phoible, &languoid).unwrap_err();
        assert!(matches!(err, InventoryError::Empty { .. }));
    }

    #[test]
    fn test_modal_family() {
        let row = |fam: &str| LanguageRow {
            glottocode: "x".into(),
            language_name: "x".into(),
            family_name: fam.into(),
            total_inventory_size: 1,
            vowel_inventory_size: 1,
            vowel_inv_c: 0.0,
            y_present: false,
            i_present: false,
        };
        let rows = vec![row("Bantu"), row("Austronesian"), row("Bantu")];
        assert_eq!(modal_family(&rows).as_deref(), Some("Bantu"));
        let tied = vec![row("Bantu"), row("Austronesian")];
        assert_eq!(modal_family(&tied).as_deref(), Some("Austronesian"));
        assert_eq!(modal_family(&[]), None);
    }
}
