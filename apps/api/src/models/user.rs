use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A caller whose bearer token the store accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    /// Forwarded on store writes so row-level policies see the caller, not the service.
    #[serde(skip)]
    pub access_token: String,
}
