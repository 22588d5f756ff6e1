//! Quiz assembly from an extracted word list.
//!
//! A quiz runs in three series: multiple choice, matching groups of three,
//! then typed answers.

pub mod session;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::types::{Direction, LanguagePair, WordList, WordPair};

pub use session::{Feedback, QuizSession, QuizSummary, SessionError, Tier};

/// Number of pairs in one matching question.
pub const MATCH_GROUP_SIZE: usize = 3;

const MULTIPLE_CHOICE_SHARE: f64 = 0.35;
const MATCH_SHARE: f64 = 0.35;
const DISTRACTORS: usize = 3;

/// How much of the word list a quiz covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuizScope {
    #[serde(rename = "0.3")]
    Part,
    #[serde(rename = "0.7")]
    Most,
    #[default]
    #[serde(rename = "1")]
    All,
}

impl QuizScope {
    pub fn fraction(self) -> f64 {
        match self {
            Self::Part => 0.3,
            Self::Most => 0.7,
            Self::All => 1.0,
        }
    }

    /// Parse a stored scope value; anything unknown means the whole list.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "0.3" => Self::Part,
            "0.7" => Self::Most,
            _ => Self::All,
        }
    }
}

/// Kind of question, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    Match,
    Typed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Question {
    MultipleChoice {
        item: WordPair,
        direction: Direction,
        options: Vec<String>,
    },
    Match {
        items: Vec<WordPair>,
        right_column: Vec<String>,
    },
    Typed {
        item: WordPair,
        direction: Direction,
    },
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Self::Match { .. } => QuestionKind::Match,
            Self::Typed { .. } => QuestionKind::Typed,
        }
    }

    /// Book answer for single-word questions.
    pub fn book_answer(&self) -> Option<&str> {
        match self {
            Self::MultipleChoice {
                item, direction, ..
            }
            | Self::Typed { item, direction } => Some(item.book_answer(*direction)),
            Self::Match { .. } => None,
        }
    }
}

/// An assembled quiz, ready to be played through a [`QuizSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPlan {
    pub languages: LanguagePair,
    pub questions: Vec<Question>,
}

/// Build a quiz from a validated word list.
///
/// The list is shuffled and cut down to the scope (at least one pair). About
/// 35% of the pairs become multiple-choice questions and 35% are grouped into
/// matching questions; the rest are typed. Matching pairs that do not fill a
/// complete group are left out.
pub fn build_quiz<R: Rng + ?Sized>(
    list: &WordList,
    scope: QuizScope,
    rng: &mut R,
) -> Result<QuizPlan> {
    if list.items.is_empty() {
        return Err(ValidationError::EmptyWordList);
    }

    let mut bank = list.items.clone();
    bank.shuffle(rng);
    let scoped = ((bank.len() as f64 * scope.fraction()).round() as usize).max(1);
    bank.truncate(scoped);

    let mc_count = share(bank.len(), MULTIPLE_CHOICE_SHARE);
    let (mc_items, rest) = bank.split_at(mc_count);
    let match_count = share(bank.len(), MATCH_SHARE).min(rest.len());
    let (match_items, typed_items) = rest.split_at(match_count);

    let mut multiple_choice: Vec<Question> = mc_items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let direction = Direction::alternating(i);
            Question::MultipleChoice {
                item: item.clone(),
                direction,
                options: multiple_choice_options(item, direction, &bank, rng),
            }
        })
        .collect();
    multiple_choice.shuffle(rng);

    let matching: Vec<Question> = match_items
        .chunks_exact(MATCH_GROUP_SIZE)
        .map(|group| {
            let mut right_column: Vec<String> = group
                .iter()
                .map(|item| item.first_translation().to_string())
                .collect();
            right_column.shuffle(rng);
            Question::Match {
                items: group.to_vec(),
                right_column,
            }
        })
        .collect();

    let mut typed: Vec<Question> = typed_items
        .iter()
        .enumerate()
        .map(|(i, item)| Question::Typed {
            item: item.clone(),
            direction: Direction::alternating(i),
        })
        .collect();
    typed.shuffle(rng);

    let mut questions = multiple_choice;
    questions.extend(matching);
    questions.extend(typed);

    Ok(QuizPlan {
        languages: list.languages.clone(),
        questions,
    })
}

/// The book answer plus up to three answers taken from other pairs, shuffled.
pub fn multiple_choice_options<R: Rng + ?Sized>(
    item: &WordPair,
    direction: Direction,
    bank: &[WordPair],
    rng: &mut R,
) -> Vec<String> {
    let mut distractors: Vec<String> = bank
        .iter()
        .filter(|other| *other != item)
        .map(|other| other.book_answer(direction).to_string())
        .collect();
    distractors.shuffle(rng);
    distractors.truncate(DISTRACTORS);

    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(item.book_answer(direction).to_string());
    options.extend(distractors);
    options.shuffle(rng);
    options
}

fn share(len: usize, fraction: f64) -> usize {
    (len as f64 * fraction).round() as usize
}
