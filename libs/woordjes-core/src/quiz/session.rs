//! Progress through a quiz: current question, score and hints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Question, QuestionKind, QuizPlan};
use crate::error::ValidationError;
use crate::hint::{Hint, MAX_HINT_LEVEL};
use crate::matching::evaluate;
use crate::normalize::normalize;
use crate::types::MatchKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("the quiz is finished")]
    Finished,

    #[error("the current question was already answered")]
    AlreadyAnswered,

    #[error("expected a {expected:?} question, current question is {actual:?}")]
    WrongQuestionKind {
        expected: QuestionKind,
        actual: QuestionKind,
    },

    #[error("{paired} of {required} pairs made")]
    IncompletePairs { paired: usize, required: usize },

    #[error("pair {left} -> {right} is out of range")]
    InvalidPair { left: usize, right: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result shown after answering a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Feedback {
    Correct { book_answer: String },
    AlmostCorrect { typed: String, book_answer: String },
    Wrong { book_answer: String },
    PairsCorrect,
    PairsWrong { expected: Vec<(String, String)> },
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(
            self,
            Self::Correct { .. } | Self::AlmostCorrect { .. } | Self::PairsCorrect
        )
    }
}

/// Closing message band for the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    KeepPracticing,
}

impl Tier {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::KeepPracticing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub score: u32,
    pub total: usize,
    pub percentage: u32,
    pub tier: Tier,
}

/// Mutable progress record for one run through a [`QuizPlan`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    plan: QuizPlan,
    index: usize,
    score: u32,
    hint_level: u8,
    feedback: Option<Feedback>,
}

impl QuizSession {
    pub fn new(plan: QuizPlan) -> Self {
        Self {
            plan,
            index: 0,
            score: 0,
            hint_level: 0,
            feedback: None,
        }
    }

    pub fn current(&self) -> Option<&Question> {
        self.plan.questions.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.plan.questions.len()
    }

    pub fn hint_level(&self) -> u8 {
        self.hint_level
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.total()
    }

    /// Check a typed answer against every accepted translation.
    pub fn answer_typed(&mut self, answer: &str) -> Result<&Feedback, SessionError> {
        let (item, direction) = match self.open_question()? {
            Question::Typed { item, direction } => (item, *direction),
            other => return Err(wrong_kind(QuestionKind::Typed, other)),
        };

        let references = item.references(direction);
        let language = self.plan.languages.answer_language(direction);
        let verdict = evaluate(answer, references.as_slice(), Some(language))?;
        let book_answer = item.book_answer(direction).to_string();

        let feedback = match verdict.match_kind {
            MatchKind::Exact => Feedback::Correct { book_answer },
            MatchKind::Approximate => Feedback::AlmostCorrect {
                typed: answer.to_string(),
                book_answer,
            },
            MatchKind::Rejected => Feedback::Wrong { book_answer },
        };
        Ok(self.record(feedback))
    }

    /// Pick one of the multiple-choice options.
    pub fn choose_option(&mut self, option: &str) -> Result<&Feedback, SessionError> {
        let book_answer = match self.open_question()? {
            Question::MultipleChoice {
                item, direction, ..
            } => item.book_answer(*direction).to_string(),
            other => return Err(wrong_kind(QuestionKind::MultipleChoice, other)),
        };

        let feedback = if normalize(option) == normalize(&book_answer) {
            Feedback::Correct { book_answer }
        } else {
            Feedback::Wrong { book_answer }
        };
        Ok(self.record(feedback))
    }

    /// Submit left-to-right pairings for a matching question.
    ///
    /// Keys are indexes into the question's items, values indexes into its
    /// right column. Every item has to be paired.
    pub fn submit_pairs(
        &mut self,
        pairs: &HashMap<usize, usize>,
    ) -> Result<&Feedback, SessionError> {
        let (items, right_column) = match self.open_question()? {
            Question::Match {
                items,
                right_column,
            } => (items, right_column),
            other => return Err(wrong_kind(QuestionKind::Match, other)),
        };

        if let Some((&left, &right)) = pairs
            .iter()
            .find(|&(&left, &right)| left >= items.len() || right >= right_column.len())
        {
            return Err(SessionError::InvalidPair { left, right });
        }
        if pairs.len() < items.len() {
            return Err(SessionError::IncompletePairs {
                paired: pairs.len(),
                required: items.len(),
            });
        }

        let all_correct = items.iter().enumerate().all(|(left, item)| {
            pairs
                .get(&left)
                .map(|&right| {
                    normalize(&right_column[right]) == normalize(item.first_translation())
                })
                .unwrap_or(false)
        });

        let feedback = if all_correct {
            Feedback::PairsCorrect
        } else {
            Feedback::PairsWrong {
                expected: items
                    .iter()
                    .map(|item| (item.a.clone(), item.first_translation().to_string()))
                    .collect(),
            }
        };
        Ok(self.record(feedback))
    }

    /// Raise the hint level for the current typed question and return the hint.
    pub fn request_hint(&mut self) -> Result<Option<Hint>, SessionError> {
        let book_answer = match self.open_question()? {
            Question::Typed { item, direction } => item.book_answer(*direction).to_string(),
            other => return Err(wrong_kind(QuestionKind::Typed, other)),
        };

        self.hint_level = (self.hint_level + 1).min(MAX_HINT_LEVEL);
        Ok(Hint::for_level(&book_answer, self.hint_level))
    }

    /// Move on to the next question. Unanswered questions score nothing.
    pub fn advance(&mut self) {
        if self.is_finished() {
            return;
        }
        self.index += 1;
        self.hint_level = 0;
        self.feedback = None;
    }

    /// Position of the current question as a percentage of the quiz.
    pub fn progress_percent(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let position = self.index.min(total - 1) + 1;
        percentage(position as u32, total)
    }

    pub fn summary(&self) -> QuizSummary {
        let total = self.total();
        let percentage = if total == 0 {
            0
        } else {
            percentage(self.score, total)
        };
        QuizSummary {
            score: self.score,
            total,
            percentage,
            tier: Tier::for_percentage(percentage),
        }
    }

    fn open_question(&self) -> Result<&Question, SessionError> {
        let question = self.current().ok_or(SessionError::Finished)?;
        if self.feedback.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }
        Ok(question)
    }

    fn record(&mut self, feedback: Feedback) -> &Feedback {
        if feedback.is_correct() {
            self.score += 1;
        }
        self.feedback.insert(feedback)
    }
}

fn wrong_kind(expected: QuestionKind, actual: &Question) -> SessionError {
    SessionError::WrongQuestionKind {
        expected,
        actual: actual.kind(),
    }
}

fn percentage(part: u32, total: usize) -> u32 {
    (part as f64 / total as f64 * 100.0).round() as u32
}
