//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from woordjes-core
pub use woordjes_core::{Hint, MatchVerdict, QuizPlan, QuizScope, WordList};

/// Status marker used by the extraction endpoint, matching what the web client expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
}

// === Extraction ===

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Status,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub status: Status,
    pub extracted: WordList,
    pub extracted_at: DateTime<Utc>,
}

// === Quiz ===

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildQuizRequest {
    pub word_list: WordList,
    #[serde(default)]
    pub scope: QuizScope,
    /// Fixed seed for a reproducible question order.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckAnswerRequest {
    pub answer: String,
    pub references: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HintRequest {
    pub reference: String,
    pub level: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HintResponse {
    pub hint: Option<Hint>,
}
