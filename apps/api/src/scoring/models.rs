use serde::{Deserialize, Serialize};

/// Lowest score any verdict may report.
pub const SCORE_MIN: u32 = 0;
/// Highest score any verdict may report.
pub const SCORE_MAX: u32 = 100;

/// Body of `POST /api/score`. Both fields are optional at the wire level so a
/// missing prompt can be reported as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreRequest {
    pub prompt: Option<String>,
    pub challenge: Option<String>,
}

/// Evaluation payload returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl ScoreResult {
    /// Zero-score payload shown when an attempt could not be evaluated at all.
    pub fn unavailable(message: &str) -> Self {
        Self {
            score: 0,
            feedback: message.to_string(),
            strengths: vec![],
            improvements: vec![],
        }
    }
}
