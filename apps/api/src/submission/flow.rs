//! One user-initiated attempt: score → resolve caller → record attempt → award XP.
//!
//! The flow always resolves to a `SubmissionOutcome`. Scoring failures turn into a
//! zero-score payload; store failures are logged and reported in `message` while the
//! score is still returned.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::challenges::catalog::Challenge;
use crate::errors::AppError;
use crate::llm_client::CompletionService;
use crate::models::attempt::NewAttempt;
use crate::models::user::AuthUser;
use crate::scoring::evaluator::evaluate_prompt;
use crate::scoring::models::{ScoreRequest, ScoreResult};
use crate::scoring::verdict::VerdictExtractor;
use crate::store::AttemptStore;
use crate::submission::idempotency::idempotency_key;

/// Shortest prompt (trimmed, in characters) accepted for a challenge attempt.
pub const MIN_PROMPT_CHARS: usize = 10;

pub const UNSCORED_MESSAGE: &str = "Could not evaluate prompt. Please try again.";
pub const NOT_SIGNED_IN_MESSAGE: &str = "Please log in first to earn XP. Progress was not saved.";
pub const SESSION_CHECK_FAILED_MESSAGE: &str =
    "Could not verify your session. Progress was not saved.";
pub const SAVE_FAILED_MESSAGE: &str = "Your score could not be saved. Please try again later.";
pub const ALREADY_CREDITED_MESSAGE: &str =
    "This attempt was already credited recently. No additional XP awarded.";
pub const XP_FAILED_MESSAGE: &str = "Attempt saved, but XP could not be awarded.";

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub result: ScoreResult,
    /// True when the attempt row exists in the store (new or previously credited).
    pub saved: bool,
    pub xp_awarded: u32,
    pub message: String,
}

impl SubmissionOutcome {
    fn unsaved(result: ScoreResult, message: &str) -> Self {
        Self {
            result,
            saved: false,
            xp_awarded: 0,
            message: message.to_string(),
        }
    }
}

/// Collaborators the flow needs, borrowed from `AppState`.
pub struct SubmissionDeps<'a> {
    pub llm: &'a dyn CompletionService,
    pub verdict: &'a dyn VerdictExtractor,
    pub store: &'a dyn AttemptStore,
    pub idempotency_window: Duration,
}

/// Rejects prompts shorter than `MIN_PROMPT_CHARS` after trimming.
pub fn validate_submission_prompt(prompt: &str) -> Result<&str, AppError> {
    let trimmed = prompt.trim();
    if trimmed.chars().count() < MIN_PROMPT_CHARS {
        return Err(AppError::Validation(format!(
            "Prompt must be at least {MIN_PROMPT_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

pub async fn submit_attempt(
    deps: &SubmissionDeps<'_>,
    challenge: &Challenge,
    prompt: &str,
    access_token: Option<&str>,
    now: DateTime<Utc>,
) -> SubmissionOutcome {
    // Step 1: score
    let request = ScoreRequest {
        prompt: Some(prompt.to_string()),
        challenge: Some(challenge.title.to_string()),
    };
    let result = match evaluate_prompt(deps.llm, deps.verdict, &request).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Challenge {} attempt could not be scored: {e}", challenge.id);
            let result = ScoreResult::unavailable(UNSCORED_MESSAGE);
            return SubmissionOutcome::unsaved(result, UNSCORED_MESSAGE);
        }
    };

    // Step 2: resolve caller
    let Some(token) = access_token else {
        return SubmissionOutcome::unsaved(result, NOT_SIGNED_IN_MESSAGE);
    };
    let user = match deps.store.authenticate(token).await {
        Ok(Some(user)) => user,
        Ok(None) => return SubmissionOutcome::unsaved(result, NOT_SIGNED_IN_MESSAGE),
        Err(e) => {
            error!("Session lookup failed during submission: {e}");
            return SubmissionOutcome::unsaved(result, SESSION_CHECK_FAILED_MESSAGE);
        }
    };

    // Step 3: bookkeeping
    record_and_award(deps, challenge, &user, result, now).await
}

async fn record_and_award(
    deps: &SubmissionDeps<'_>,
    challenge: &Challenge,
    user: &AuthUser,
    result: ScoreResult,
    now: DateTime<Utc>,
) -> SubmissionOutcome {
    let attempt = NewAttempt {
        user_id: user.id,
        challenge: challenge.title.to_string(),
        score: result.score,
        xp: challenge.xp,
        idempotency_key: idempotency_key(user.id, challenge.id, now, deps.idempotency_window),
    };

    match deps.store.record_attempt(user, &attempt).await {
        Ok(true) => {}
        Ok(false) => {
            info!(
                "Duplicate attempt for user {} on challenge {}; XP not re-awarded",
                user.id, challenge.id
            );
            return SubmissionOutcome {
                result,
                saved: true,
                xp_awarded: 0,
                message: ALREADY_CREDITED_MESSAGE.to_string(),
            };
        }
        Err(e) => {
            error!("Error saving attempt for user {}: {e}", user.id);
            return SubmissionOutcome::unsaved(result, SAVE_FAILED_MESSAGE);
        }
    }

    if let Err(e) = deps.store.increment_xp(user, challenge.xp).await {
        error!("Error awarding {} XP to user {}: {e}", challenge.xp, user.id);
        return SubmissionOutcome {
            result,
            saved: true,
            xp_awarded: 0,
            message: XP_FAILED_MESSAGE.to_string(),
        };
    }

    info!(
        "User {} earned {} XP on challenge {}",
        user.id, challenge.xp, challenge.id
    );
    SubmissionOutcome {
        result,
        saved: true,
        xp_awarded: challenge.xp,
        message: format!(
            "You earned {} XP for completing \"{}\"!",
            challenge.xp, challenge.title
        ),
    }
}
