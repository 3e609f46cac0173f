//! Session tokens and the cookie that carries them.

use axum::http::{header, HeaderMap, HeaderValue};
use sha2::{Digest, Sha256};
use std::time::Duration;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// A new opaque session token (256 random bits, hex encoded)
pub fn generate_token() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

/// Digest stored server-side for a token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Read a cookie value from the request's `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Attributes of the session cookie
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub max_age: Duration,
    pub secure: bool,
}

impl SessionCookie {
    /// `Set-Cookie` value that stores `token`
    pub fn set(&self, token: &str) -> Result<HeaderValue> {
        self.build(token, self.max_age.as_secs())
    }

    /// `Set-Cookie` value that removes the cookie
    pub fn clear(&self) -> Result<HeaderValue> {
        self.build("", 0)
    }

    fn build(&self, value: &str, max_age: u64) -> Result<HeaderValue> {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).map_err(|e| {
            AppError::Internal(format!("Invalid session cookie '{}': {}", self.name, e))
        })
    }
}
