//! Axum route handlers for the Scoring API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::scoring::evaluator::evaluate_prompt;
use crate::scoring::models::{ScoreRequest, ScoreResult};
use crate::state::AppState;

/// POST /api/score
///
/// Scores a prompt against an optional challenge label.
/// 400 on a missing prompt or unreadable body, 500 when the completion service fails.
pub async fn handle_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResult>, AppError> {
    let Json(request) = payload.map_err(invalid_body)?;

    let result = evaluate_prompt(state.llm.as_ref(), state.verdict.as_ref(), &request).await?;

    Ok(Json(result))
}

pub(crate) fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes::build_router;
    use crate::testing::{test_state, FakeCompletion, FakeStore};

    async fn post_score(
        llm: &std::sync::Arc<FakeCompletion>,
        body: Body,
    ) -> (StatusCode, Value) {
        let app = build_router(test_state(llm.clone(), FakeStore::shared()));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_score_success_payload_shape() {
        let llm = FakeCompletion::shared_replying("Concise and well scoped.");
        let body = json!({
            "prompt": "Explain quantum computing to a child in three sentences.",
            "challenge": "Clear Instructions"
        });

        let (status, body) = post_score(&llm, Body::from(body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        let score = body["score"].as_u64().unwrap();
        assert!(score <= 100);
        assert_eq!(body["feedback"], "Concise and well scoped.");
        assert_eq!(body["strengths"].as_array().unwrap().len(), 3);
        assert_eq!(body["improvements"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_400_without_outbound_call() {
        let llm = FakeCompletion::shared_replying("unused");

        let (status, body) = post_score(&llm, Body::from(r#"{"prompt": ""}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Prompt is missing.");
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_prompt_field_is_400() {
        let llm = FakeCompletion::shared_replying("unused");

        let body = Body::from(r#"{"challenge": "Context Setting"}"#);
        let (status, body) = post_score(&llm, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let llm = FakeCompletion::shared_replying("unused");

        let (status, body) = post_score(&llm, Body::from("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_and_service_stays_up() {
        let llm = FakeCompletion::shared_failing(500, "connection reset by peer");
        let body = json!({ "prompt": "Summarize the article." }).to_string();

        let (status, first) = post_score(&llm, Body::from(body.clone())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = first["error"].as_str().unwrap();
        assert!(message.starts_with("Evaluation failed."));
        assert!(message.contains("connection reset by peer"));

        let (status, _) = post_score(&llm, Body::from(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(llm.calls(), 2);
    }
}
