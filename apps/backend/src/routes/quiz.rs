//! Quiz endpoints

use axum::Json;
use rand::{rngs::StdRng, SeedableRng};
use woordjes_core::MatchQuery;

use crate::error::Result;
use crate::models::*;

/// POST /api/quiz/build
pub async fn build(Json(req): Json<BuildQuizRequest>) -> Result<Json<QuizPlan>> {
    let list = req.word_list.validate()?;
    let mut rng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plan = woordjes_core::build_quiz(&list, req.scope, &mut rng)?;
    tracing::debug!(
        items = list.items.len(),
        questions = plan.questions.len(),
        "quiz built"
    );
    Ok(Json(plan))
}

/// POST /api/quiz/check
pub async fn check(Json(req): Json<CheckAnswerRequest>) -> Result<Json<MatchVerdict>> {
    let query = MatchQuery {
        candidate: req.answer,
        references: req.references,
        answer_language: req.language,
    };
    Ok(Json(query.evaluate()?))
}

/// POST /api/quiz/hint
pub async fn hint(Json(req): Json<HintRequest>) -> Json<HintResponse> {
    Json(HintResponse {
        hint: Hint::for_level(&req.reference, req.level),
    })
}
