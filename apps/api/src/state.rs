use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::scoring::verdict::VerdictExtractor;
use crate::store::AttemptStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion client built once at startup. Tests swap in a fake.
    pub llm: Arc<dyn CompletionService>,
    /// Pluggable verdict extractor. Default: PlaceholderVerdict. Swap via VERDICT_MODE.
    pub verdict: Arc<dyn VerdictExtractor>,
    pub store: Arc<dyn AttemptStore>,
    pub config: Config,
}
