use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::password::PasswordHasher;
use crate::features::users::dtos::{PictureUpload, RegistrationForm};
use crate::features::users::models::{User, UserProfile};
use crate::features::users::repositories::UserRepository;
use crate::modules::storage::{extension_for_content_type, MediaStorage};
use crate::shared::constants::{ALLOWED_IMAGE_MIME_TYPES, PROFILE_IMAGES_DIR};
use crate::shared::forms::FormErrors;

const MSG_USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Outcome of submitting the registration page
#[derive(Debug)]
pub enum RegistrationOutcome {
    Registered(User),
    Invalid(FormErrors),
}

/// Creates accounts together with their profile and optional picture
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    storage: Arc<MediaStorage>,
    hasher: PasswordHasher,
    max_upload_size: usize,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        storage: Arc<MediaStorage>,
        hasher: PasswordHasher,
        max_upload_size: usize,
    ) -> Self {
        Self {
            repository,
            storage,
            hasher,
            max_upload_size,
        }
    }

    /// Register a new user.
    ///
    /// Nothing is persisted unless both the account and the profile are
    /// valid; a stored picture is removed again if the insert fails.
    pub async fn register(&self, form: RegistrationForm) -> Result<RegistrationOutcome> {
        let form = form.cleaned();

        let mut errors = form.field_errors();
        if let Some(picture) = &form.picture {
            if let Err(message) = self.check_picture(picture) {
                errors.add("picture", message);
            }
        }
        if errors.field("username").is_empty()
            && self.repository.username_exists(&form.user.username).await?
        {
            errors.add("username", MSG_USERNAME_TAKEN);
        }
        if !errors.is_empty() {
            return Ok(RegistrationOutcome::Invalid(errors));
        }

        let password_hash = self.hasher.hash(&form.user.password).await?;
        let user = User::new(
            form.user.username,
            form.user.email.unwrap_or_default(),
            password_hash,
        );

        let picture_key = match &form.picture {
            Some(picture) => Some(self.store_picture(picture).await?),
            None => None,
        };
        let profile = UserProfile::new(user.id, form.profile.website, picture_key.clone());

        if let Err(e) = self.repository.create_with_profile(&user, &profile).await {
            if let Some(key) = &picture_key {
                if let Err(cleanup) = self.storage.delete(key).await {
                    tracing::warn!("Failed to remove orphaned picture {}: {}", key, cleanup);
                }
            }
            return match e {
                AppError::Conflict(_) => {
                    let mut errors = FormErrors::new();
                    errors.add("username", MSG_USERNAME_TAKEN);
                    Ok(RegistrationOutcome::Invalid(errors))
                }
                other => Err(other),
            };
        }

        tracing::info!("User registered: id={}, username={}", user.id, user.username);
        Ok(RegistrationOutcome::Registered(user))
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        self.repository.find_profile(user_id).await
    }

    /// Public URL of a profile's picture, if it has one
    pub fn picture_url(&self, profile: &UserProfile) -> Option<String> {
        profile
            .picture
            .as_deref()
            .map(|key| self.storage.get_file_url(key))
    }

    fn check_picture(&self, picture: &PictureUpload) -> std::result::Result<(), String> {
        if !ALLOWED_IMAGE_MIME_TYPES.contains(&picture.content_type.as_str()) {
            return Err(format!(
                "Upload a valid image. Allowed types: {}",
                ALLOWED_IMAGE_MIME_TYPES.join(", ")
            ));
        }
        if picture.data.len() > self.max_upload_size {
            return Err(format!(
                "The picture is too large. Maximum size is {} bytes.",
                self.max_upload_size
            ));
        }
        Ok(())
    }

    async fn store_picture(&self, picture: &PictureUpload) -> Result<String> {
        let extension = extension_for_content_type(&picture.content_type).ok_or_else(|| {
            AppError::BadRequest(format!("Unsupported image type '{}'", picture.content_type))
        })?;
        let key = self.storage.generate_key(PROFILE_IMAGES_DIR, extension);
        self.storage.upload(&key, &picture.data).await?;
        tracing::debug!("Stored profile picture {} as {}", picture.file_name, key);
        Ok(key)
    }
}
