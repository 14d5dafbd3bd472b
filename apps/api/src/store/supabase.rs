use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use super::{AttemptStore, StoreError};
use crate::models::attempt::{AttemptRow, NewAttempt};
use crate::models::profile::ProfileRow;
use crate::models::user::AuthUser;

const ATTEMPTS_TABLE: &str = "scores";
const PROFILES_TABLE: &str = "profiles";
const INCREMENT_XP_RPC: &str = "increment_xp";

/// REST client for a Supabase project (PostgREST rows + RPC, GoTrue auth).
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: Uuid,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    msg: Option<String>,
}

impl SupabaseStore {
    pub fn new(base_url: String, anon_key: String, timeout: Duration) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{path}", self.base_url)
    }

    fn with_auth(&self, builder: RequestBuilder, access_token: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }

    async fn json_or_error<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn ensure_success(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestError>(&body)
            .ok()
            .and_then(|e| e.message.or(e.msg))
            .unwrap_or(body);
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AttemptStore for SupabaseStore {
    async fn authenticate(&self, access_token: &str) -> Result<Option<AuthUser>, StoreError> {
        let response = self
            .with_auth(
                self.client.get(format!("{}/auth/v1/user", self.base_url)),
                access_token,
            )
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            debug!("Store rejected bearer token");
            return Ok(None);
        }

        let user: GoTrueUser = Self::json_or_error(response).await?;
        Ok(Some(AuthUser {
            id: user.id,
            email: user.email,
            access_token: access_token.to_string(),
        }))
    }

    async fn record_attempt(
        &self,
        user: &AuthUser,
        attempt: &NewAttempt,
    ) -> Result<bool, StoreError> {
        let response = self
            .with_auth(
                self.client
                    .post(self.rest_url(ATTEMPTS_TABLE))
                    .query(&[("on_conflict", "idempotency_key")])
                    .header("Prefer", "return=representation,resolution=ignore-duplicates"),
                &user.access_token,
            )
            .json(&[attempt])
            .send()
            .await?;

        // Ignored duplicates come back as an empty representation.
        let inserted: Vec<serde_json::Value> = Self::json_or_error(response).await?;
        Ok(!inserted.is_empty())
    }

    async fn increment_xp(&self, user: &AuthUser, points: u32) -> Result<(), StoreError> {
        let response = self
            .with_auth(
                self.client
                    .post(self.rest_url(&format!("rpc/{INCREMENT_XP_RPC}"))),
                &user.access_token,
            )
            .json(&json!({ "userid": user.id, "points": points }))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn get_profile(&self, user: &AuthUser) -> Result<Option<ProfileRow>, StoreError> {
        let id_filter = format!("eq.{}", user.id);
        let response = self
            .with_auth(
                self.client
                    .get(self.rest_url(PROFILES_TABLE))
                    .query(&[("id", id_filter.as_str()), ("select", "id,username,xp")]),
                &user.access_token,
            )
            .send()
            .await?;

        let rows: Vec<ProfileRow> = Self::json_or_error(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_attempts(&self, user: &AuthUser) -> Result<Vec<AttemptRow>, StoreError> {
        let user_filter = format!("eq.{}", user.id);
        let response = self
            .with_auth(
                self.client.get(self.rest_url(ATTEMPTS_TABLE)).query(&[
                    ("user_id", user_filter.as_str()),
                    ("select", "id,user_id,challenge,score,xp,created_at"),
                    ("order", "created_at.desc"),
                ]),
                &user.access_token,
            )
            .send()
            .await?;

        Self::json_or_error(response).await
    }
}
