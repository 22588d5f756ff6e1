//! Text normalization applied to every answer before comparison.
//!
//! Removes the typing variance that should never cost a point: accents,
//! casing, surrounding whitespace, apostrophes and sentence punctuation.

use unicode_normalization::UnicodeNormalization;

const APOSTROPHES: &[char] = &['\'', '\u{2019}'];
const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '"'];

/// Normalize a string for answer comparison.
///
/// `"  Café!  "` and `"cafe"` both become `"cafe"`. The result is a fixed
/// point: normalizing it again returns it unchanged.
pub fn normalize(text: &str) -> String {
    let folded = strip_diacritics(&text.to_lowercase());
    let cleaned: String = folded
        .chars()
        .filter(|c| !APOSTROPHES.contains(c) && !PUNCTUATION.contains(c))
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decompose (NFD) and drop combining diacritical marks.
///
/// Lower-casing happens first so that marks introduced by case mapping
/// (`İ` lower-cases to `i` + U+0307) are stripped as well.
fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_diacritic(*c)).collect()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}
