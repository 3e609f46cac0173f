use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::forms::{non_blank, normalize_url, FormErrors};
use crate::shared::validation::USERNAME_REGEX;

const MSG_INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";

/// Account part of the registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserFormDto {
    #[validate(length(min = 1, max = 150, message = "Enter a username of 1 to 150 characters."))]
    pub username: String,

    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure the email has at most 254 characters.")
    )]
    pub email: Option<String>,

    /// Never echoed back into the form
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
}

/// Profile part of the registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserProfileFormDto {
    #[validate(
        url(message = "Enter a valid URL."),
        length(max = 200, message = "Ensure the website has at most 200 characters.")
    )]
    pub website: Option<String>,
}

/// An uploaded profile picture
#[derive(Debug, Clone)]
pub struct PictureUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Registration request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct RegisterFormDto {
    #[schema(example = "jane")]
    pub username: String,
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    pub password: String,
    #[schema(example = "www.example.com")]
    pub website: Option<String>,
    /// Optional profile picture (PNG, JPEG, GIF or WebP)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub picture: Option<String>,
}

/// Everything submitted on the registration page
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub user: UserFormDto,
    pub profile: UserProfileFormDto,
    pub picture: Option<PictureUpload>,
}

impl RegistrationForm {
    /// Trim values, drop blank optionals and prefix scheme-less websites
    pub fn cleaned(self) -> Self {
        Self {
            user: UserFormDto {
                username: self.user.username.trim().to_string(),
                email: non_blank(self.user.email),
                password: self.user.password,
            },
            profile: UserProfileFormDto {
                website: non_blank(self.profile.website).map(|w| normalize_url(&w)),
            },
            picture: self.picture.filter(|p| !p.data.is_empty()),
        }
    }

    /// Field validation for both forms; uniqueness and upload checks happen later
    pub fn field_errors(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if let Err(e) = self.user.validate() {
            errors.extend(e.into());
        }
        if !self.user.username.is_empty() && !USERNAME_REGEX.is_match(&self.user.username) {
            errors.add("username", MSG_INVALID_USERNAME);
        }
        if let Err(e) = self.profile.validate() {
            errors.extend(e.into());
        }

        errors
    }
}
