mod pg_category_repository;

pub use pg_category_repository::PgCategoryRepository;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::Category;

/// Persistence seam for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Categories ordered by likes, most liked first
    async fn top_by_likes(&self, limit: i64) -> Result<Vec<Category>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    async fn exists_by_name_or_slug(&self, name: &str, slug: &str) -> Result<bool>;

    /// Fails with `AppError::Conflict` when the name or slug is taken
    async fn insert(&self, category: &Category) -> Result<()>;

    async fn count(&self) -> Result<i64>;
}
