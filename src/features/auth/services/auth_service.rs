use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Session};
use crate::features::auth::password::PasswordHasher;
use crate::features::auth::repositories::SessionRepository;
use crate::features::auth::session::{generate_token, hash_token, SessionCookie};
use crate::features::users::models::User;
use crate::features::users::repositories::UserRepository;

/// Result of checking submitted credentials
#[derive(Debug)]
pub enum LoginOutcome {
    Success(User),
    Disabled,
    InvalidCredentials,
}

/// Credential checks and the server-side session lifecycle
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: PasswordHasher,
    cookie: SessionCookie,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: PasswordHasher,
        cookie: SessionCookie,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            cookie,
        }
    }

    pub fn cookie(&self) -> &SessionCookie {
        &self.cookie
    }

    /// Check a username/password pair.
    ///
    /// A disabled account is only reported once the password matched. Unknown
    /// usernames still pay for a full hash.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let Some(user) = self.users.find_by_username(username).await? else {
            self.hasher.verify_placeholder(password).await?;
            return Ok(LoginOutcome::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            return Ok(LoginOutcome::InvalidCredentials);
        }
        if !user.is_active {
            return Ok(LoginOutcome::Disabled);
        }

        Ok(LoginOutcome::Success(user))
    }

    /// Start a session for `user`; returns the token to put in the cookie
    pub async fn login(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let ttl = ChronoDuration::from_std(self.cookie.max_age)
            .map_err(|e| AppError::Internal(format!("Invalid session lifetime: {}", e)))?;

        let token = generate_token();
        let session = Session {
            token_hash: hash_token(&token),
            user_id: user.id,
            created_at: now,
            expires_at: now + ttl,
        };
        self.sessions.create(&session).await?;
        self.users.touch_last_login(user.id, now).await?;

        tracing::info!("User logged in: id={}, username={}", user.id, user.username);
        Ok(token)
    }

    /// The user behind a session token, if the session is live and the account active
    pub async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedUser>> {
        let token_hash = hash_token(token);
        let Some(session) = self.sessions.find_active(&token_hash, Utc::now()).await? else {
            return Ok(None);
        };

        let user = self.users.find_by_id(session.user_id).await?;
        Ok(user.filter(|u| u.is_active).map(|u| AuthenticatedUser {
            user_id: u.id,
            username: u.username,
            session_key: session.token_hash,
        }))
    }

    /// End the session identified by its stored digest
    pub async fn logout(&self, user: &AuthenticatedUser) -> Result<()> {
        self.sessions.delete(&user.session_key).await?;
        tracing::info!("User logged out: id={}, username={}", user.user_id, user.username);
        Ok(())
    }

    /// Delete expired sessions; returns how many were removed
    pub async fn purge_expired_sessions(&self) -> Result<u64> {
        self.sessions.delete_expired(Utc::now()).await
    }
}
