use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub views: i32,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// A fresh category with zeroed counters
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            slug,
            views: 0,
            likes: 0,
            created_at: Utc::now(),
        }
    }
}
