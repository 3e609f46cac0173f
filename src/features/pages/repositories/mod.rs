mod pg_page_repository;

pub use pg_page_repository::PgPageRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::pages::models::Page;

/// Persistence seam for pages
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Pages ordered by views, most viewed first
    async fn top_by_views(&self, limit: i64) -> Result<Vec<Page>>;

    /// Pages of one category in the order they were added
    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Page>>;

    async fn insert(&self, page: &Page) -> Result<()>;
}
