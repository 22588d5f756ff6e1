//! Core types for the vocabulary trainer.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Which side of a word pair is shown and which one is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "A_TO_B")]
    AToB,
    #[serde(rename = "B_TO_A")]
    BToA,
}

impl Direction {
    /// Alternates A to B, B to A, ... by question index.
    pub fn alternating(index: usize) -> Self {
        if index % 2 == 0 {
            Self::AToB
        } else {
            Self::BToA
        }
    }
}

/// The two languages found on a photographed word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub a: String,
    pub b: String,
}

impl LanguagePair {
    /// Language the learner has to answer in for the given direction.
    pub fn answer_language(&self, direction: Direction) -> &str {
        match direction {
            Direction::AToB => &self.b,
            Direction::BToA => &self.a,
        }
    }
}

/// A term in language A with one or more accepted translations in language B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub a: String,
    pub b: Vec<String>,
}

impl WordPair {
    pub fn new<I, S>(a: impl Into<String>, b: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            a: a.into(),
            b: b.into_iter().map(Into::into).collect(),
        }
    }

    /// Text shown to the learner.
    pub fn prompt(&self, direction: Direction) -> &str {
        match direction {
            Direction::AToB => &self.a,
            Direction::BToA => self.first_translation(),
        }
    }

    /// Answers accepted for the given direction, in preference order.
    pub fn references(&self, direction: Direction) -> Vec<String> {
        match direction {
            Direction::AToB => self.b.clone(),
            Direction::BToA => vec![self.a.clone()],
        }
    }

    /// The answer as printed in the book.
    pub fn book_answer(&self, direction: Direction) -> &str {
        match direction {
            Direction::AToB => self.first_translation(),
            Direction::BToA => &self.a,
        }
    }

    pub fn first_translation(&self) -> &str {
        self.b.first().map(String::as_str).unwrap_or_default()
    }
}

/// Word pairs extracted from a photographed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordList {
    pub languages: LanguagePair,
    pub items: Vec<WordPair>,
}

impl WordList {
    /// Check the list and return a cleaned copy.
    ///
    /// Language tags are trimmed and lower-cased, terms and synonyms are
    /// trimmed and blank synonyms are dropped. The first problem found is
    /// returned; nothing is skipped silently.
    pub fn validate(self) -> Result<Self> {
        let languages = LanguagePair {
            a: validate_language("a", &self.languages.a)?,
            b: validate_language("b", &self.languages.b)?,
        };

        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let a = item.a.trim().to_string();
                if a.is_empty() {
                    return Err(ValidationError::EmptyTerm { index });
                }
                let b: Vec<String> = item
                    .b
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if b.is_empty() {
                    return Err(ValidationError::EmptyTranslations { index });
                }
                Ok(WordPair { a, b })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { languages, items })
    }
}

fn validate_language(side: &'static str, value: &str) -> Result<String> {
    let tag = value.trim().to_ascii_lowercase();
    if tag.is_empty() {
        return Err(ValidationError::MissingLanguage { side });
    }
    if tag.len() != 2 || !tag.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::InvalidLanguage {
            side,
            value: value.to_string(),
        });
    }
    Ok(tag)
}

/// How a candidate answer relates to the references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Approximate,
    Rejected,
}

/// Outcome of checking a typed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchVerdict {
    pub accepted: bool,
    pub match_kind: MatchKind,
}

impl From<MatchKind> for MatchVerdict {
    fn from(match_kind: MatchKind) -> Self {
        Self {
            accepted: match_kind != MatchKind::Rejected,
            match_kind,
        }
    }
}
