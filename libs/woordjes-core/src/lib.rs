//! Core library of the vocabulary trainer, shared by the backend.
//!
//! Provides:
//! - Answer matching for typed answers (normalization, phonetic folding,
//!   Levenshtein distance)
//! - Progressive hints
//! - Parsing and validation of word lists returned by the vision model
//! - Quiz assembly and the per-quiz progress record

pub mod error;
pub mod hint;
pub mod matching;
pub mod normalize;
pub mod parser;
pub mod phonetic;
pub mod quiz;
pub mod types;

pub use error::{ParseError, Result, ValidationError};
pub use hint::{reveal_letters, Hint};
pub use matching::{evaluate, levenshtein_distance, MatchQuery};
pub use normalize::normalize;
pub use parser::parse_extraction;
pub use quiz::{build_quiz, Feedback, Question, QuizPlan, QuizScope, QuizSession, QuizSummary};
pub use types::{Direction, LanguagePair, MatchKind, MatchVerdict, WordList, WordPair};
