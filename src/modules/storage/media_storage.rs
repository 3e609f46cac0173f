//! Local filesystem storage for user uploads
//!
//! Files are written below the media root and served back under the media
//! URL prefix (`/media` by default).

use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::MediaConfig;
use crate::core::error::AppError;

/// Storage for uploaded files on the local filesystem
pub struct MediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStorage {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: config.root.clone(),
            url_prefix: config.url_prefix.clone(),
        }
    }

    /// Create the media root if it doesn't exist
    pub async fn ensure_root_exists(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await?;
        info!("Media root ready at {}", self.root.display());
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a unique key `{dir}/{uuid}.{extension}`
    pub fn generate_key(&self, dir: &str, extension: &str) -> String {
        format!("{}/{}.{}", dir, Uuid::new_v4(), extension)
    }

    /// Write `data` under `key`, creating parent directories as needed
    pub async fn upload(&self, key: &str, data: &[u8]) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, data).await?;

        debug!("Stored media file: {} ({} bytes)", key, data.len());
        Ok(())
    }

    /// Remove the file stored under `key`; a missing file is not an error
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted media file: {}", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Media file already gone: {}", key);
                Ok(())
            }
            Err(e) => Err(AppError::Storage(e)),
        }
    }

    #[cfg(test)]
    pub async fn exists(&self, key: &str) -> Result<bool, AppError> {
        let path = self.path_for(key)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    /// Public URL of a stored file
    pub fn get_file_url(&self, key: &str) -> String {
        format!("{}/{}", self.url_prefix, key)
    }

    /// Resolve a key to a path, refusing anything that could escape the root
    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_plain {
            return Err(AppError::BadRequest(format!("Invalid media key '{}'", key)));
        }

        Ok(self.root.join(relative))
    }
}

/// File extension for an accepted image MIME type
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}
