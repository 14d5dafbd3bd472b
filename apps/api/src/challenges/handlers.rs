use axum::{
    extract::{rejection::PathRejection, Path},
    Json,
};

use crate::challenges::catalog::{self, Challenge, ChallengeSummary};
use crate::errors::AppError;

/// GET /api/challenges
pub async fn handle_list_challenges() -> Json<Vec<ChallengeSummary>> {
    Json(catalog::all().iter().map(ChallengeSummary::from).collect())
}

/// GET /api/challenges/:id
pub async fn handle_get_challenge(
    path: Result<Path<u32>, PathRejection>,
) -> Result<Json<Challenge>, AppError> {
    resolve_challenge(path).cloned().map(Json)
}

/// Maps the `:id` segment to a catalog entry: 400 when it is not a number, 404 when
/// no challenge has that id.
pub(crate) fn resolve_challenge(
    path: Result<Path<u32>, PathRejection>,
) -> Result<&'static Challenge, AppError> {
    let Path(id) = path
        .map_err(|e| AppError::Validation(format!("Invalid challenge id: {}", e.body_text())))?;
    catalog::find(id).ok_or_else(|| AppError::NotFound(format!("Challenge {id} not found")))
}
