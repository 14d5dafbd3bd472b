use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::scoring::verdict::VerdictMode;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_timeout: Duration,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub store_timeout: Duration,
    pub verdict_mode: VerdictMode,
    /// Width of the time bucket folded into submission idempotency keys.
    pub idempotency_window: Duration,
    pub cors_allowed_origin: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = Env(lookup);

        let verdict_mode = match env.optional("VERDICT_MODE") {
            Some(raw) => raw
                .parse::<VerdictMode>()
                .map_err(|e| anyhow::anyhow!(e))
                .context("VERDICT_MODE must be 'placeholder' or 'parsed'")?,
            None => VerdictMode::Placeholder,
        };

        let idempotency_window = env.secs("IDEMPOTENCY_WINDOW_SECS", 3600)?;
        if idempotency_window.is_zero() {
            bail!("IDEMPOTENCY_WINDOW_SECS must be greater than zero");
        }

        Ok(Config {
            openai_api_key: env.require("OPENAI_API_KEY")?,
            openai_base_url: env
                .optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            llm_timeout: env.secs("LLM_TIMEOUT_SECS", 30)?,
            supabase_url: env.require("SUPABASE_URL")?,
            supabase_anon_key: env.require("SUPABASE_ANON_KEY")?,
            store_timeout: env.secs("STORE_TIMEOUT_SECS", 10)?,
            verdict_mode,
            idempotency_window,
            cors_allowed_origin: env.optional("CORS_ALLOWED_ORIGIN"),
            port: env
                .optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env.optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Fixed configuration for handler and flow tests. Never reads the environment.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            llm_timeout: Duration::from_secs(5),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "anon-test".to_string(),
            store_timeout: Duration::from_secs(5),
            verdict_mode: VerdictMode::Placeholder,
            idempotency_window: Duration::from_secs(3600),
            cors_allowed_origin: None,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn require(&self, key: &str) -> Result<String> {
        let Some(value) = (self.0)(key) else {
            bail!("Required environment variable '{key}' is not set");
        };
        if value.trim().is_empty() {
            bail!("Required environment variable '{key}' is empty");
        }
        Ok(value)
    }

    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn secs(&self, key: &str, default: u64) -> Result<Duration> {
        let secs = match self.optional(key) {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("{key} must be a whole number of seconds"))?,
            None => default,
        };
        Ok(Duration::from_secs(secs))
    }
}
