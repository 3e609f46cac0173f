use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One-to-one extension of [`super::User`], created at registration
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub website: Option<String>,
    /// Storage key of the uploaded picture, relative to the media root
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: Uuid, website: Option<String>, picture: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            website,
            picture,
            created_at: Utc::now(),
        }
    }
}
