//! Managed data store: auth lookup, attempt rows, XP procedure, profile reads.
//!
//! Schema and query semantics belong to the hosted backend; this module only speaks
//! its REST surface. Handlers reach it through `Arc<dyn AttemptStore>` in `AppState`.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::attempt::{AttemptRow, NewAttempt};
use crate::models::profile::ProfileRow;
use crate::models::user::AuthUser;

pub mod supabase;

pub use supabase::SupabaseStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Resolves a bearer token. `Ok(None)` means the store rejected it.
    async fn authenticate(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError>;

    /// Inserts an attempt. Returns `false` when a row with the same idempotency key
    /// already exists and nothing was written.
    async fn record_attempt(&self, user: &AuthUser, attempt: &NewAttempt)
        -> Result<bool, StoreError>;

    /// Adds `points` to the user's running XP total.
    async fn increment_xp(&self, user: &AuthUser, points: u32) -> Result<(), StoreError>;

    async fn get_profile(&self, user: &AuthUser) -> Result<Option<ProfileRow>, StoreError>;

    /// The user's attempts, newest first.
    async fn list_attempts(&self, user: &AuthUser) -> Result<Vec<AttemptRow>, StoreError>;
}
