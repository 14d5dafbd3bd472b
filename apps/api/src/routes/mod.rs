pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::challenges::handlers as challenges;
use crate::profile::handlers as profile;
use crate::scoring::handlers as scoring;
use crate::state::AppState;
use crate::submission::handlers as submission;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/score", post(scoring::handle_score))
        .route("/api/challenges", get(challenges::handle_list_challenges))
        .route("/api/challenges/:id", get(challenges::handle_get_challenge))
        .route(
            "/api/challenges/:id/submit",
            post(submission::handle_submit),
        )
        .route("/api/profile", get(profile::handle_get_profile))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::testing::{test_state, FakeCompletion, FakeStore};

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(
            FakeCompletion::shared_replying("unused"),
            FakeStore::shared(),
        ));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "prompthub-api");
    }
}
