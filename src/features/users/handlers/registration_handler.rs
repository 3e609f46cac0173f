use axum::{
    extract::{Multipart, State},
    response::Html,
};
use minijinja::context;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::state::AppState;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    PictureUpload, RegisterFormDto, RegistrationForm, UserFormDto, UserProfileFormDto,
};
use crate::features::users::services::RegistrationOutcome;
use crate::shared::forms::FormErrors;

#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Empty registration form", content_type = "text/html", body = String),
    ),
    tag = "users"
)]
pub async fn register_form(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
) -> Result<Html<String>> {
    render_page(
        &state,
        user.as_ref(),
        &RegistrationForm::default(),
        &FormErrors::new(),
        false,
    )
}

/// Register a new user
///
/// Accepts multipart/form-data with:
/// - `username`, `password` (required), `email` (optional)
/// - `website` (optional), `picture` (optional image file)
#[utoipa::path(
    post,
    path = "/register",
    request_body(
        content = RegisterFormDto,
        content_type = "multipart/form-data",
        description = "Account and profile fields with an optional profile picture",
    ),
    responses(
        (status = 200, description = "Registration page, marked registered on success", content_type = "text/html", body = String),
        (status = 400, description = "Malformed multipart body"),
        (status = 413, description = "Request body too large"),
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<Html<String>> {
    let form = read_registration_form(multipart).await?;

    match state.users.register(form.clone()).await? {
        RegistrationOutcome::Registered(registered) => state.render(
            "rango/register.html",
            context! {
                user => user,
                registered => true,
                username => registered.username,
            },
        ),
        RegistrationOutcome::Invalid(errors) => {
            tracing::warn!("Invalid registration form: {}", errors);
            render_page(&state, user.as_ref(), &form, &errors, false)
        }
    }
}

fn render_page(
    state: &AppState,
    user: Option<&AuthenticatedUser>,
    form: &RegistrationForm,
    errors: &FormErrors,
    registered: bool,
) -> Result<Html<String>> {
    state.render(
        "rango/register.html",
        context! {
            user => user,
            user_form => &form.user,
            profile_form => &form.profile,
            errors => errors,
            registered => registered,
        },
    )
}

async fn read_registration_form(mut multipart: Multipart) -> Result<RegistrationForm> {
    let mut user = UserFormDto::default();
    let mut profile = UserProfileFormDto::default();
    let mut picture: Option<PictureUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "picture" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read picture bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read picture data: {}", e))
                })?;

                picture = Some(PictureUpload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "username" | "email" | "password" | "website" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
                })?;
                match field_name.as_str() {
                    "username" => user.username = text,
                    "email" => user.email = Some(text),
                    "password" => user.password = text,
                    _ => profile.website = Some(text),
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    Ok(RegistrationForm {
        user,
        profile,
        picture,
    })
}
