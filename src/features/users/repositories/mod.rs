mod pg_user_repository;

pub use pg_user_repository::PgUserRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::users::models::{User, UserProfile};

/// Persistence seam for accounts and their profiles
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn username_exists(&self, username: &str) -> Result<bool>;

    /// Insert both rows or neither; a taken username is `AppError::Conflict`
    async fn create_with_profile(&self, user: &User, profile: &UserProfile) -> Result<()>;

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>>;

    async fn touch_last_login(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<()>;
}
