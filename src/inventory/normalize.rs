//! Phoneme string normalisation
//!
//! Transcriptions in PHOIBLE mix length, stress and tone marks into the
//! segment symbol. Stripping them lets `aː`, `á` and `a` collapse onto one
//! canonical vowel while keeping the base characters that encode rounding
//! and frontness.

use unicode_normalization::UnicodeNormalization;

/// Length, stress and tone marks removed from every symbol.
///
/// ː ˑ ˈ ˌ plus combining grave, acute, circumflex, tilde, macron, breve
/// and diaeresis.
pub const STRIPPED_MARKS: &[char] = &[
    '\u{02D0}', '\u{02D1}', '\u{02C8}', '\u{02CC}', '\u{0300}', '\u{0301}', '\u{0302}',
    '\u{0303}', '\u{0304}', '\u{0306}', '\u{0308}',
];

/// Normalise a phoneme and strip length/stress/tone marks.
///
/// The string is NFKC-normalised first so compatibility forms fold onto
/// their base letters, then decomposed so precomposed letters (`á`) expose
/// their marks, filtered, and recomposed. Missing input maps to the empty
/// string. Never fails.
pub fn normalize_phoneme(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let stripped: String = raw
        .nfkc()
        .nfd()
        .filter(|c| !STRIPPED_MARKS.contains(c))
        .collect();
    stripped.nfc().collect::<String>().trim().to_string()
}
