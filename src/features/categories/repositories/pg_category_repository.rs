use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::conflict_or_database;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;

/// PostgreSQL-backed category repository
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn top_by_likes(&self, limit: i64) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, views, likes, created_at
            FROM categories
            ORDER BY likes DESC, created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list top categories: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, views, likes, created_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn exists_by_name_or_slug(&self, name: &str, slug: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1 OR slug = $2)
            "#,
        )
        .bind(name)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, views, likes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.views)
        .bind(category.likes)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_database(e, "Category with this name already exists."))?;

        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
