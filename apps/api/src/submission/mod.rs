// Submission flow: score a challenge attempt, then record it and award XP for signed-in callers.

pub mod flow;
pub mod handlers;
pub mod idempotency;
