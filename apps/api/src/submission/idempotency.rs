use std::time::Duration;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Key that collapses repeat submissions of one challenge by one user inside a time window.
///
/// key = hex(sha256("{user_id}:{challenge_id}:{bucket}")), bucket = unix_secs / window_secs.
/// The store's unique constraint on the key turns a repeat into a no-op insert.
pub fn idempotency_key(
    user_id: Uuid,
    challenge_id: u32,
    at: DateTime<Utc>,
    window: Duration,
) -> String {
    let window_secs = window.as_secs().max(1) as i64;
    let bucket = at.timestamp().div_euclid(window_secs);

    let mut hasher = Sha256::new();
    hasher.update(format!("{user_id}:{challenge_id}:{bucket}").as_bytes());
    hex::encode(hasher.finalize())
}
