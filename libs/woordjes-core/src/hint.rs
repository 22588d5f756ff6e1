//! Progressive hints for typed questions.

use serde::{Deserialize, Serialize};

/// Character shown in place of letters that are not revealed yet.
pub const MASK: char = '_';

/// Highest hint level; further requests stay at this level.
pub const MAX_HINT_LEVEL: u8 = 3;

/// A hint for the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Hint {
    /// First letter and the length of the answer.
    FirstLetter { letter: char, length: usize },
    /// Answer with a prefix revealed and the rest masked.
    Masked { text: String },
}

impl Hint {
    /// Hint for the given level: 1 gives the first letter, 2 reveals 30%,
    /// 3 (or higher) reveals 80%. Level 0 and empty answers give no hint.
    pub fn for_level(answer: &str, level: u8) -> Option<Self> {
        let letter = answer.chars().next()?;
        match level {
            0 => None,
            1 => Some(Self::FirstLetter {
                letter,
                length: answer.chars().count(),
            }),
            2 => Some(Self::Masked {
                text: reveal_letters(answer, 0.3),
            }),
            _ => Some(Self::Masked {
                text: reveal_letters(answer, 0.8),
            }),
        }
    }
}

/// Show the first `max(1, floor(len * fraction))` characters of `word` and
/// mask the rest one-for-one.
pub fn reveal_letters(word: &str, fraction: f64) -> String {
    let length = word.chars().count();
    let shown = ((length as f64 * fraction).floor() as usize)
        .max(1)
        .min(length);

    word.chars()
        .take(shown)
        .chain(std::iter::repeat(MASK).take(length - shown))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reveals_at_least_one_letter() {
        assert_eq!(reveal_letters("kat", 0.3), "k__");
    }

    #[test]
    fn full_reveal_is_the_word() {
        assert_eq!(reveal_letters("kat", 1.0), "kat");
    }

    #[test]
    fn reveal_floors_the_count() {
        assert_eq!(reveal_letters("wandelen", 0.3), "wa______");
        assert_eq!(reveal_letters("wandelen", 0.8), "wandel__");
    }

    #[test]
    fn reveal_counts_characters_not_bytes() {
        assert_eq!(reveal_letters("Käse", 0.5), "Kä__");
    }

    #[test]
    fn reveal_never_exceeds_length() {
        assert_eq!(reveal_letters("ja", 5.0), "ja");
        assert_eq!(reveal_letters("", 0.3), "");
    }

    #[test]
    fn hint_levels() {
        assert_eq!(Hint::for_level("Hund", 0), None);
        assert_eq!(
            Hint::for_level("Hund", 1),
            Some(Hint::FirstLetter {
                letter: 'H',
                length: 4
            })
        );
        assert_eq!(
            Hint::for_level("Hund", 2),
            Some(Hint::Masked {
                text: "H___".into()
            })
        );
        assert_eq!(
            Hint::for_level("Hund", 3),
            Some(Hint::Masked {
                text: "Hun_".into()
            })
        );
        assert_eq!(Hint::for_level("Hund", 9), Hint::for_level("Hund", 3));
    }

    #[test]
    fn no_hint_for_empty_answer() {
        assert_eq!(Hint::for_level("", 2), None);
    }
}
