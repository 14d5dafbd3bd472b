//! Verdict extraction: turns the completion model's text into a `ScoreResult`.
//!
//! Two backends sit behind the `VerdictExtractor` trait:
//! - `PlaceholderVerdict`: randomized score in 80–100, model text as feedback, and
//!   fixed strength/improvement lists. It is a mock of real scoring.
//! - `ParsedVerdict`: asks the model for a JSON verdict and parses it, falling back to a
//!   deterministic heuristic over the prompt when the model's answer is unusable.
//!
//! `AppState` holds an `Arc<dyn VerdictExtractor>`, chosen at startup via `VERDICT_MODE`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::RngExt;
use serde::Deserialize;
use tracing::warn;

use crate::llm_client::strip_json_fences;
use crate::scoring::models::{ScoreResult, SCORE_MAX, SCORE_MIN};
use crate::scoring::prompts::{EVALUATOR_JSON_SYSTEM, EVALUATOR_SYSTEM};

/// Feedback used when the model answers with empty content.
pub const DEFAULT_FEEDBACK: &str = "Looks good! Nicely structured prompt.";

/// Inclusive range the placeholder score is drawn from.
pub const PLACEHOLDER_SCORE_RANGE: std::ops::RangeInclusive<u32> = 80..=100;

const PLACEHOLDER_STRENGTHS: [&str; 3] = [
    "Good clarity and structure",
    "Effective use of context",
    "Detailed instructions",
];

const PLACEHOLDER_IMPROVEMENTS: [&str; 2] = [
    "Consider adding output format",
    "Add role/persona clarity",
];

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictMode {
    Placeholder,
    Parsed,
}

impl FromStr for VerdictMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" | "mock" => Ok(VerdictMode::Placeholder),
            "parsed" => Ok(VerdictMode::Parsed),
            other => Err(format!("unknown verdict mode '{other}'")),
        }
    }
}

impl fmt::Display for VerdictMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictMode::Placeholder => f.write_str("placeholder"),
            VerdictMode::Parsed => f.write_str("parsed"),
        }
    }
}

/// Extracts a structured verdict from model text. Implement this to swap scoring
/// strategies without touching the endpoint or the submission flow.
pub trait VerdictExtractor: Send + Sync {
    /// System prompt this extractor expects the model to have been given.
    fn system_prompt(&self) -> &'static str;

    /// Builds the result. Must always return a score in `SCORE_MIN..=SCORE_MAX`
    /// and non-empty strengths and improvements.
    fn extract(&self, prompt: &str, model_text: &str) -> ScoreResult;
}

pub fn extractor_for(mode: VerdictMode) -> Arc<dyn VerdictExtractor> {
    match mode {
        VerdictMode::Placeholder => Arc::new(PlaceholderVerdict),
        VerdictMode::Parsed => Arc::new(ParsedVerdict),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PlaceholderVerdict
// ────────────────────────────────────────────────────────────────────────────

/// Mock verdict: the model's commentary under a random score and two static lists.
/// Nothing except `feedback` depends on the model's judgment.
pub struct PlaceholderVerdict;

impl VerdictExtractor for PlaceholderVerdict {
    fn system_prompt(&self) -> &'static str {
        EVALUATOR_SYSTEM
    }

    fn extract(&self, _prompt: &str, model_text: &str) -> ScoreResult {
        let score = rand::rng().random_range(PLACEHOLDER_SCORE_RANGE);

        ScoreResult {
            score,
            feedback: feedback_or_default(model_text),
            strengths: PLACEHOLDER_STRENGTHS.iter().map(|s| s.to_string()).collect(),
            improvements: PLACEHOLDER_IMPROVEMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ParsedVerdict
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ModelVerdict {
    score: f64,
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
}

/// Parses the model's JSON verdict. Falls back to `heuristic_verdict` when the
/// model's text is not a usable verdict.
pub struct ParsedVerdict;

impl VerdictExtractor for ParsedVerdict {
    fn system_prompt(&self) -> &'static str {
        EVALUATOR_JSON_SYSTEM
    }

    fn extract(&self, prompt: &str, model_text: &str) -> ScoreResult {
        let parsed = serde_json::from_str::<ModelVerdict>(strip_json_fences(model_text))
            .ok()
            .filter(|v| v.score.is_finite());

        let Some(verdict) = parsed else {
            if !model_text.trim().is_empty() {
                warn!("Model verdict was not valid JSON, using heuristic score");
            }
            let mut fallback = heuristic_verdict(prompt);
            fallback.feedback = feedback_or_default(model_text);
            return fallback;
        };

        let heuristic = heuristic_verdict(prompt);
        let score = verdict.score.round().clamp(SCORE_MIN as f64, SCORE_MAX as f64) as u32;

        ScoreResult {
            score,
            feedback: feedback_or_default(&verdict.feedback),
            strengths: non_empty_items(verdict.strengths).unwrap_or(heuristic.strengths),
            improvements: non_empty_items(verdict.improvements).unwrap_or(heuristic.improvements),
        }
    }
}

fn non_empty_items(items: Vec<String>) -> Option<Vec<String>> {
    let items: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}

/// Returns the model's text untouched unless it is blank.
fn feedback_or_default(text: &str) -> String {
    if text.trim().is_empty() {
        DEFAULT_FEEDBACK.to_string()
    } else {
        text.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Deterministic heuristic
// ────────────────────────────────────────────────────────────────────────────

struct Criterion {
    strength: &'static str,
    improvement: &'static str,
    check: fn(&str) -> bool,
}

const CRITERIA: &[Criterion] = &[
    Criterion {
        strength: "Gives the model enough detail to work with",
        improvement: "Expand the prompt with more specific detail",
        check: |p| p.split_whitespace().count() >= 12,
    },
    Criterion {
        strength: "Assigns the model a clear role or persona",
        improvement: "Add role/persona clarity",
        check: |p| contains_any(p, &["act as", "you are", "as a ", "role", "persona", "expert"]),
    },
    Criterion {
        strength: "Specifies the expected output format",
        improvement: "Consider adding output format",
        check: |p| {
            contains_any(
                p,
                &["json", "list", "table", "bullet", "format", "csv", "markdown", "step-by-step"],
            )
        },
    },
    Criterion {
        strength: "Sets concrete constraints",
        improvement: "Add constraints such as length, scope, or tone",
        check: |p| {
            p.chars().any(|c| c.is_ascii_digit())
                || contains_any(
                    p,
                    &["words", "sentences", "paragraph", "tone", "must", "only", "limit", "avoid"],
                )
        },
    },
    Criterion {
        strength: "Provides context about audience or purpose",
        improvement: "Describe the audience or the purpose of the output",
        check: |p| {
            contains_any(
                p,
                &[
                    "audience", "for a ", "for an ", "because", "so that", "context", "purpose",
                    "goal",
                ],
            )
        },
    },
];

const HEURISTIC_BASE: u32 = 40;
const HEURISTIC_STEP: u32 = 12;

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Scores a prompt on five surface criteria. Same input always yields the same result.
///
/// score = 40 + 12 × criteria met (40 – 100). Met criteria become strengths, unmet
/// ones become improvements; each list gets a generic item when it would be empty.
pub fn heuristic_verdict(prompt: &str) -> ScoreResult {
    let lower = prompt.to_lowercase();

    let mut strengths = Vec::new();
    let mut improvements = Vec::new();
    for criterion in CRITERIA {
        if (criterion.check)(&lower) {
            strengths.push(criterion.strength.to_string());
        } else {
            improvements.push(criterion.improvement.to_string());
        }
    }

    let score = (HEURISTIC_BASE + HEURISTIC_STEP * strengths.len() as u32).min(SCORE_MAX);

    if strengths.is_empty() {
        strengths.push("States a clear intent".to_string());
    }
    if improvements.is_empty() {
        improvements.push("Include an example of the desired output".to_string());
    }

    ScoreResult {
        score,
        feedback: DEFAULT_FEEDBACK.to_string(),
        strengths,
        improvements,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
