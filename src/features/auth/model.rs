use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// The logged-in account attached to a request by the session middleware
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    /// Digest of the session token the request was authenticated with
    #[serde(skip_serializing)]
    pub session_key: String,
}

/// Server-side login session
///
/// Only the SHA-256 digest of the cookie token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
