//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Hashes are stored as `pbkdf2_sha256$<iterations>$<salt>$<base64 digest>`,
//! so the iteration count can be raised without invalidating old hashes.

use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "pbkdf2_sha256";

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Hash `password` with a fresh random salt, off the async worker threads
    pub async fn hash(&self, password: &str) -> Result<String> {
        let hasher = *self;
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    /// Check `password` against an encoded hash, off the async worker threads
    pub async fn verify(&self, password: &str, encoded: &str) -> Result<bool> {
        let hasher = *self;
        let password = password.to_string();
        let encoded = encoded.to_string();
        tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &encoded))
            .await
            .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))
    }

    /// Run a full verification that can never succeed.
    ///
    /// Used when the account does not exist, so the response costs as much
    /// as a wrong password for a real account.
    pub async fn verify_placeholder(&self, password: &str) -> Result<()> {
        let placeholder = self.placeholder_hash();
        self.verify(password, &placeholder).await.map(|_| ())
    }

    /// Well-formed hash at this hasher's cost whose digest no password derives
    fn placeholder_hash(&self) -> String {
        format!(
            "{}${}${}${}",
            ALGORITHM,
            self.iterations,
            "rango-placeholder",
            BASE64_STANDARD.encode([0u8; 32])
        )
    }

    fn hash_blocking(&self, password: &str) -> Result<String> {
        let salt = Uuid::new_v4().simple().to_string();
        self.hash_with_salt(password, &salt)
    }

    fn hash_with_salt(&self, password: &str, salt: &str) -> Result<String> {
        let digest = pbkdf2_sha256(password.as_bytes(), salt.as_bytes(), self.iterations)?;
        Ok(format!(
            "{}${}${}${}",
            ALGORITHM,
            self.iterations,
            salt,
            BASE64_STANDARD.encode(digest)
        ))
    }

    /// Malformed hashes never verify.
    fn verify_blocking(&self, password: &str, encoded: &str) -> bool {
        let mut parts = encoded.splitn(4, '$');
        let (Some(algorithm), Some(iterations), Some(salt), Some(expected)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        if algorithm != ALGORITHM {
            return false;
        }
        let Ok(iterations) = iterations.parse::<u32>() else {
            return false;
        };
        if iterations == 0 {
            return false;
        }
        let Ok(expected) = BASE64_STANDARD.decode(expected) else {
            return false;
        };

        match pbkdf2_sha256(password.as_bytes(), salt.as_bytes(), iterations) {
            Ok(actual) => constant_time_eq(&actual, &expected),
            Err(_) => false,
        }
    }
}

/// Single-block PBKDF2 (derived key length = SHA-256 output length)
fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; 32]> {
    let prf = HmacSha256::new_from_slice(password)
        .map_err(|e| AppError::Internal(format!("Failed to key HMAC: {}", e)))?;

    let mut mac = prf.clone();
    mac.update(salt);
    mac.update(&1u32.to_be_bytes());
    let mut block = [0u8; 32];
    block.copy_from_slice(&mac.finalize().into_bytes());
    let mut derived = block;

    for _ in 1..iterations {
        let mut mac = prf.clone();
        mac.update(&block);
        block.copy_from_slice(&mac.finalize().into_bytes());
        for (d, b) in derived.iter_mut().zip(block.iter()) {
            *d ^= b;
        }
    }

    Ok(derived)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = PasswordHasher::new(1_000);
        let encoded = hasher.hash("correct horse").await.unwrap();

        assert!(encoded.starts_with("pbkdf2_sha256$1000$"));
        assert!(hasher.verify("correct horse", &encoded).await.unwrap());
        assert!(!hasher.verify("battery staple", &encoded).await.unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new(10);
        assert_ne!(
            hasher.hash_blocking("same").unwrap(),
            hasher.hash_blocking("same").unwrap()
        );
    }

    #[test]
    fn test_verify_uses_stored_iterations() {
        let old = PasswordHasher::new(100).hash_blocking("secret").unwrap();
        assert!(PasswordHasher::new(5_000).verify_blocking("secret", &old));
    }

    #[test]
    fn test_known_vector() {
        // RFC 7914 section 11 PBKDF2-HMAC-SHA256 test vector (first 32 bytes)
        let digest = pbkdf2_sha256(b"passwd", b"salt", 1).unwrap();
        assert_eq!(
            hex::encode(digest),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_malformed_hashes_never_verify() {
        let hasher = PasswordHasher::new(10);
        for encoded in [
            "",
            "plaintext",
            "md5$10$salt$abc",
            "pbkdf2_sha256$notanumber$salt$abc",
            "pbkdf2_sha256$0$salt$abc",
            "pbkdf2_sha256$10$salt$!!!notbase64",
        ] {
            assert!(!hasher.verify_blocking("anything", encoded), "{:?}", encoded);
        }
    }

    #[test]
    fn test_placeholder_hash_runs_at_full_cost() {
        let hasher = PasswordHasher::new(4_321);
        let placeholder = hasher.placeholder_hash();

        let parts: Vec<&str> = placeholder.splitn(4, '$').collect();
        assert_eq!(parts[0], "pbkdf2_sha256");
        assert_eq!(parts[1], "4321");
        // A 32-byte digest means verification derives the key before comparing
        assert_eq!(BASE64_STANDARD.decode(parts[3]).unwrap().len(), 32);
        assert!(!hasher.verify_blocking("", &placeholder));
        assert!(!hasher.verify_blocking("rango-placeholder", &placeholder));
    }

    #[tokio::test]
    async fn test_hashing_leaves_the_runtime_free() {
        // Single-threaded runtime: the ticker only advances if hashing runs elsewhere
        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = {
            let ticks = ticks.clone();
            tokio::spawn(async move {
                loop {
                    ticks.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
            })
        };
        tokio::task::yield_now().await;

        let hasher = PasswordHasher::new(100_000);
        let before = ticks.load(Ordering::SeqCst);
        let encoded = hasher.hash("slow").await.unwrap();
        let during_hash = ticks.load(Ordering::SeqCst) - before;
        let verified = hasher.verify("slow", &encoded).await.unwrap();
        ticker.abort();

        assert!(verified);
        assert!(during_hash >= 2, "ticker advanced {} times", during_hash);
    }
}
