use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a page filed under a category
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub url: String,
    pub views: i32,
    pub created_at: DateTime<Utc>,
}

impl Page {
    /// New pages always start with zero views
    pub fn new(category_id: Uuid, title: String, url: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            category_id,
            title,
            url,
            views: 0,
            created_at: Utc::now(),
        }
    }
}
