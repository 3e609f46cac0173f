use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::conflict_or_database;
use crate::core::error::{AppError, Result};
use crate::features::users::models::{User, UserProfile};
use crate::features::users::repositories::UserRepository;

const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// PostgreSQL-backed user repository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_active, date_joined, last_login
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user by username: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_active, date_joined, last_login
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create_with_profile(&self, user: &User, profile: &UserProfile) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, is_active, date_joined, last_login)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.date_joined)
        .bind(user.last_login)
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_or_database(e, USERNAME_TAKEN))?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (id, user_id, website, picture, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.website)
        .bind(&profile.picture)
        .bind(profile.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("User registered: id={}, username={}", user.id, user.username);
        Ok(())
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, user_id, website, picture, created_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn touch_last_login(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(user_id)
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
