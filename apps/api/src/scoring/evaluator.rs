//! Prompt evaluation: validate, call the completion service once, extract a verdict.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::CompletionService;
use crate::scoring::models::{ScoreRequest, ScoreResult};
use crate::scoring::prompts::build_evaluation_message;
use crate::scoring::verdict::VerdictExtractor;

pub const MISSING_PROMPT_MESSAGE: &str = "Prompt is missing.";

/// Scores one prompt.
///
/// A missing or blank prompt is rejected before the completion service is called.
/// Completion failures are logged and returned as `AppError::Llm`; nothing is retried.
pub async fn evaluate_prompt(
    llm: &dyn CompletionService,
    verdict: &dyn VerdictExtractor,
    request: &ScoreRequest,
) -> Result<ScoreResult, AppError> {
    let prompt = request
        .prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::Validation(MISSING_PROMPT_MESSAGE.to_string()))?;

    let message = build_evaluation_message(request.challenge.as_deref(), prompt);

    let model_text = llm
        .complete(verdict.system_prompt(), &message)
        .await
        .map_err(|e| {
            warn!("Completion call failed while scoring prompt: {e}");
            AppError::Llm(e)
        })?;

    let result = verdict.extract(prompt, &model_text);
    info!(
        "Scored prompt ({} chars) for challenge {:?}: {}/100",
        prompt.chars().count(),
        request.challenge.as_deref().unwrap_or("-"),
        result.score
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::models::{SCORE_MAX, SCORE_MIN};
    use crate::scoring::verdict::{ParsedVerdict, PlaceholderVerdict};
    use crate::testing::FakeCompletion;

    fn request(prompt: Option<&str>, challenge: Option<&str>) -> ScoreRequest {
        ScoreRequest {
            prompt: prompt.map(str::to_string),
            challenge: challenge.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_quantum_prompt_scenario() {
        let llm = FakeCompletion::replying("A clear, well-bounded prompt.");
        let req = request(
            Some("Explain quantum computing to a child in three sentences."),
            Some("Clear Instructions"),
        );

        let result = evaluate_prompt(&llm, &PlaceholderVerdict, &req).await.unwrap();

        assert!((SCORE_MIN..=SCORE_MAX).contains(&result.score));
        assert!(!result.feedback.is_empty());
        assert_eq!(result.strengths.len(), 3);
        assert_eq!(result.improvements.len(), 2);
        assert_eq!(llm.calls(), 1);
        let (system, user) = llm.last_call().unwrap();
        assert!(system.contains("prompt evaluator"));
        assert!(user.starts_with("Challenge: Clear Instructions"));
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected_without_call() {
        let llm = FakeCompletion::replying("unused");

        for prompt in [None, Some(""), Some("   \n\t")] {
            let err = evaluate_prompt(&llm, &PlaceholderVerdict, &request(prompt, None))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == MISSING_PROMPT_MESSAGE));
        }

        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_llm_error() {
        let llm = FakeCompletion::failing(401, "Incorrect API key provided");
        let err = evaluate_prompt(&llm, &PlaceholderVerdict, &request(Some("Summarize this"), None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
        assert!(err.to_string().contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn test_parsed_verdict_uses_json_system_prompt() {
        let llm = FakeCompletion::replying(
            r#"{"score": 55, "feedback": "Needs format.", "strengths": ["Short"], "improvements": ["Add format"]}"#,
        );
        let result = evaluate_prompt(&llm, &ParsedVerdict, &request(Some("Summarize this"), None))
            .await
            .unwrap();

        assert_eq!(result.score, 55);
        let (system, _) = llm.last_call().unwrap();
        assert!(system.contains("valid JSON only"));
    }

    #[tokio::test]
    async fn test_repeated_calls_stay_structurally_valid() {
        let llm = FakeCompletion::replying("");
        let req = request(Some("Write a haiku about Rust."), Some("Creative Writing"));

        for _ in 0..2 {
            let result = evaluate_prompt(&llm, &PlaceholderVerdict, &req).await.unwrap();
            assert!(result.score <= SCORE_MAX);
            assert!(!result.feedback.is_empty());
            assert!(!result.strengths.is_empty());
            assert!(!result.improvements.is_empty());
        }
        assert_eq!(llm.calls(), 2);
    }
}
