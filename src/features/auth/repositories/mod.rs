mod pg_session_repository;

pub use pg_session_repository::PgSessionRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::error::Result;
use crate::features::auth::model::Session;

/// Persistence seam for login sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<()>;

    /// The session for `token_hash`, unless it expired before `now`
    async fn find_active(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<Session>>;

    async fn delete(&self, token_hash: &str) -> Result<()>;

    /// Returns the number of sessions removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}
