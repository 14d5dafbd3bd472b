// LLM prompt constants for the Scoring module.

/// System prompt for free-text evaluation. The model's answer is shown verbatim as feedback.
pub const EVALUATOR_SYSTEM: &str = "You are a professional AI prompt evaluator. \
    Score the given prompt from 0–100, and give feedback, strengths, and improvements.";

/// System prompt for structured evaluation. Enforces JSON-only output.
pub const EVALUATOR_JSON_SYSTEM: &str = r#"You are a professional AI prompt evaluator. Score the given prompt from 0–100, and give feedback, strengths, and improvements.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 72,
  "feedback": "Two or three sentences of overall feedback.",
  "strengths": ["Short strength", "Another strength"],
  "improvements": ["Short, actionable improvement"]
}

Rules:
- score is an integer from 0 to 100
- strengths and improvements each hold 1 to 4 short items
- judge the prompt against the stated challenge

You MUST respond with valid JSON only. Do NOT include any text outside the JSON object. Do NOT use markdown code fences."#;

/// Challenge label used when the caller does not name one.
pub const DEFAULT_CHALLENGE_LABEL: &str = "Open practice";

/// Builds the user message sent alongside the evaluator system prompt.
pub fn build_evaluation_message(challenge: Option<&str>, prompt: &str) -> String {
    let challenge = challenge
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CHALLENGE_LABEL);

    format!("Challenge: {challenge}\n\nPrompt: {prompt}")
}
