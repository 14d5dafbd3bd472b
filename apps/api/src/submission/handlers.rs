//! Axum route handlers for the Submission API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::BearerToken;
use crate::challenges::handlers::resolve_challenge;
use crate::errors::AppError;
use crate::scoring::handlers::invalid_body;
use crate::state::AppState;
use crate::submission::flow::{
    submit_attempt, validate_submission_prompt, SubmissionDeps, SubmissionOutcome,
};

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub prompt: String,
}

/// POST /api/challenges/:id/submit
///
/// Scores the prompt for the challenge, then records the attempt and awards XP when the
/// caller presents a valid bearer token. Always 200 once preconditions pass; failures
/// past that point are reported inside the outcome.
pub async fn handle_submit(
    State(state): State<AppState>,
    path: Result<Path<u32>, PathRejection>,
    BearerToken(token): BearerToken,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmissionOutcome>, AppError> {
    let challenge = resolve_challenge(path)?;

    let Json(request) = payload.map_err(invalid_body)?;
    let prompt = validate_submission_prompt(&request.prompt)?;

    let deps = SubmissionDeps {
        llm: state.llm.as_ref(),
        verdict: state.verdict.as_ref(),
        store: state.store.as_ref(),
        idempotency_window: state.config.idempotency_window,
    };

    let outcome = submit_attempt(&deps, challenge, prompt, token.as_deref(), Utc::now()).await;
    Ok(Json(outcome))
}
