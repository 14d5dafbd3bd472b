use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scored attempt, as written to the `scores` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttempt {
    pub user_id: Uuid,
    pub challenge: String,
    pub score: u32,
    pub xp: u32,
    pub idempotency_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRow {
    pub id: Option<i64>,
    pub user_id: Uuid,
    pub challenge: String,
    pub score: i64,
    pub xp: i64,
    pub created_at: Option<DateTime<Utc>>,
}
