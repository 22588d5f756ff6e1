//! Answer matching for typed quiz questions.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::normalize::normalize;
use crate::phonetic::fold;
use crate::types::{MatchKind, MatchVerdict};

/// Share of the reference length tolerated as raw typos.
const TYPO_TOLERANCE: f64 = 0.25;
/// Share of the folded reference length tolerated after phonetic folding.
const PHONETIC_TOLERANCE: f64 = 0.3;

/// A typed answer together with everything needed to judge it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchQuery {
    pub candidate: String,
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_language: Option<String>,
}

impl MatchQuery {
    pub fn evaluate(&self) -> Result<MatchVerdict> {
        evaluate(
            &self.candidate,
            self.references.as_slice(),
            self.answer_language.as_deref(),
        )
    }
}

/// Judge a typed answer against the accepted references.
///
/// References are tried in order and the first one that satisfies any rule
/// decides the verdict: exact after normalization, within the typo
/// tolerance, or within the phonetic tolerance after folding.
pub fn evaluate<S: AsRef<str>>(
    candidate: &str,
    references: &[S],
    answer_language: Option<&str>,
) -> Result<MatchVerdict> {
    if references.is_empty() {
        return Err(ValidationError::EmptyReferences);
    }

    let user = normalize(candidate);
    let kind = references
        .iter()
        .find_map(|reference| match_reference(&user, reference.as_ref(), answer_language))
        .unwrap_or(MatchKind::Rejected);

    Ok(MatchVerdict::from(kind))
}

fn match_reference(
    user: &str,
    reference: &str,
    answer_language: Option<&str>,
) -> Option<MatchKind> {
    let expected = normalize(reference);
    if user == expected {
        return Some(MatchKind::Exact);
    }

    let distance = levenshtein_distance(user, &expected);
    if distance <= tolerance(char_len(&expected), TYPO_TOLERANCE) {
        return Some(MatchKind::Approximate);
    }

    let folded_user = fold(user, answer_language);
    let folded_expected = fold(&expected, answer_language);
    let distance = levenshtein_distance(&folded_user, &folded_expected);
    if distance <= tolerance(char_len(&folded_expected), PHONETIC_TOLERANCE) {
        return Some(MatchKind::Approximate);
    }

    None
}

/// Allowed edits for a reference of `len` characters; never below one.
fn tolerance(len: usize, share: f64) -> usize {
    ((len as f64 * share).round() as usize).max(1)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        table[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            table[i][j] = (table[i - 1][j] + 1) // deletion
                .min(table[i][j - 1] + 1) // insertion
                .min(table[i - 1][j - 1] + cost); // substitution
        }
    }

    table[m][n]
}
