//! In-crate test doubles for the completion service and the data store.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;
use crate::llm_client::{CompletionService, LlmError};
use crate::models::attempt::{AttemptRow, NewAttempt};
use crate::models::profile::ProfileRow;
use crate::models::user::AuthUser;
use crate::scoring::verdict::PlaceholderVerdict;
use crate::state::AppState;
use crate::store::{AttemptStore, StoreError};

/// The only bearer token `FakeStore` accepts.
pub const VALID_TOKEN: &str = "valid-token";

pub fn test_state(llm: Arc<FakeCompletion>, store: Arc<FakeStore>) -> AppState {
    AppState {
        llm,
        verdict: Arc::new(PlaceholderVerdict),
        store,
        config: Config::for_tests(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FakeCompletion
// ────────────────────────────────────────────────────────────────────────────

pub struct FakeCompletion {
    reply: Result<String, (u16, String)>,
    calls: AtomicUsize,
    last_call: Mutex<Option<(String, String)>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Err((status, message.to_string())),
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn shared_replying(text: &str) -> Arc<Self> {
        Arc::new(Self::replying(text))
    }

    pub fn shared_failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self::failing(status, message))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (system, user) of the most recent call.
    pub fn last_call(&self) -> Option<(String, String)> {
        self.last_call.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some((system.to_string(), user.to_string()));

        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FakeStore
// ────────────────────────────────────────────────────────────────────────────

/// Accepts `VALID_TOKEN` as one fixed user and enforces idempotency-key uniqueness
/// the way the hosted table's unique constraint does.
pub struct FakeStore {
    user_id: Uuid,
    fail_inserts: bool,
    fail_xp: bool,
    auth_calls: AtomicUsize,
    keys: Mutex<HashSet<String>>,
    attempts: Mutex<Vec<NewAttempt>>,
    xp_awards: Mutex<Vec<(Uuid, u32)>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            fail_inserts: false,
            fail_xp: false,
            auth_calls: AtomicUsize::new(0),
            keys: Mutex::new(HashSet::new()),
            attempts: Mutex::new(Vec::new()),
            xp_awards: Mutex::new(Vec::new()),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn with_failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    pub fn with_failing_xp(mut self) -> Self {
        self.fail_xp = true;
        self
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    pub fn attempts(&self) -> Vec<NewAttempt> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn xp_awards(&self) -> Vec<(Uuid, u32)> {
        self.xp_awards.lock().unwrap().clone()
    }

    pub fn seed_attempt(&self, challenge: &str, score: u32, xp: u32) {
        self.attempts.lock().unwrap().push(NewAttempt {
            user_id: self.user_id,
            challenge: challenge.to_string(),
            score,
            xp,
            idempotency_key: Uuid::new_v4().to_string(),
        });
    }

    fn unavailable() -> StoreError {
        StoreError::Api {
            status: 503,
            message: "store unavailable".to_string(),
        }
    }
}

#[async_trait]
impl AttemptStore for FakeStore {
    async fn authenticate(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if access_token != VALID_TOKEN {
            return Ok(None);
        }
        Ok(Some(AuthUser {
            id: self.user_id,
            email: Some("ada@example.com".to_string()),
            access_token: access_token.to_string(),
        }))
    }

    async fn record_attempt(
        &self,
        _user: &AuthUser,
        attempt: &NewAttempt,
    ) -> Result<bool, StoreError> {
        if self.fail_inserts {
            return Err(Self::unavailable());
        }
        if !self.keys.lock().unwrap().insert(attempt.idempotency_key.clone()) {
            return Ok(false);
        }
        self.attempts.lock().unwrap().push(attempt.clone());
        Ok(true)
    }

    async fn increment_xp(&self, user: &AuthUser, points: u32) -> Result<(), StoreError> {
        if self.fail_xp {
            return Err(Self::unavailable());
        }
        self.xp_awards.lock().unwrap().push((user.id, points));
        Ok(())
    }

    async fn get_profile(&self, user: &AuthUser) -> Result<Option<ProfileRow>, StoreError> {
        let xp = self
            .xp_awards
            .lock()
            .unwrap()
            .iter()
            .map(|(_, points)| *points as i64)
            .sum();
        Ok(Some(ProfileRow {
            id: user.id,
            username: Some("ada".to_string()),
            xp,
        }))
    }

    async fn list_attempts(&self, user: &AuthUser) -> Result<Vec<AttemptRow>, StoreError> {
        let attempts = self.attempts.lock().unwrap();
        Ok(attempts
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, a)| a.user_id == user.id)
            .map(|(i, a)| AttemptRow {
                id: Some(i as i64 + 1),
                user_id: a.user_id,
                challenge: a.challenge.clone(),
                score: a.score as i64,
                xp: a.xp as i64,
                created_at: None,
            })
            .collect())
    }
}
