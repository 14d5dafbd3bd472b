use std::collections::HashSet;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::BearerToken;
use crate::errors::AppError;
use crate::models::attempt::AttemptRow;
use crate::models::profile::ProfileRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<ProfileRow>,
    pub attempts: Vec<AttemptRow>,
    /// Distinct challenges with at least one recorded attempt.
    pub challenges_completed: usize,
}

/// GET /api/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<ProfileResponse>, AppError> {
    let token = token.ok_or(AppError::Unauthorized)?;
    let user = state
        .store
        .authenticate(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let profile = state.store.get_profile(&user).await?;
    let attempts = state.store.list_attempts(&user).await?;
    let challenges_completed = attempts
        .iter()
        .map(|a| a.challenge.as_str())
        .collect::<HashSet<_>>()
        .len();

    Ok(Json(ProfileResponse {
        profile,
        attempts,
        challenges_completed,
    }))
}
