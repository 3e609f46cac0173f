use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::pages::models::Page;
use crate::features::pages::repositories::PageRepository;

/// PostgreSQL-backed page repository
pub struct PgPageRepository {
    pool: PgPool,
}

impl PgPageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageRepository for PgPageRepository {
    async fn top_by_views(&self, limit: i64) -> Result<Vec<Page>> {
        sqlx::query_as::<_, Page>(
            r#"
            SELECT id, category_id, title, url, views, created_at
            FROM pages
            ORDER BY views DESC, created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list top pages: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Page>> {
        sqlx::query_as::<_, Page>(
            r#"
            SELECT id, category_id, title, url, views, created_at
            FROM pages
            WHERE category_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list pages for category {}: {:?}", category_id, e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, page: &Page) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pages (id, category_id, title, url, views, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(page.id)
        .bind(page.category_id)
        .bind(&page.title)
        .bind(&page.url)
        .bind(page.views)
        .bind(page.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
