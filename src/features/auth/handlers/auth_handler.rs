use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;

use crate::core::error::Result;
use crate::core::extractor::AppForm;
use crate::core::state::AppState;
use crate::features::auth::dtos::LoginFormDto;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::LoginOutcome;
use crate::shared::constants::{INDEX_URL, MSG_ACCOUNT_DISABLED, MSG_INVALID_LOGIN};

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login form", content_type = "text/html", body = String),
    ),
    tag = "auth"
)]
pub async fn login_form(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
) -> Result<Html<String>> {
    state.render("rango/login.html", context! { user => user })
}

/// Log in with username and password
///
/// Success sets the session cookie and redirects to the index page. Failures
/// answer with a plain-text message.
#[utoipa::path(
    post,
    path = "/login",
    request_body(
        content = LoginFormDto,
        content_type = "application/x-www-form-urlencoded",
    ),
    responses(
        (status = 303, description = "Logged in; session cookie set, redirect to the index page"),
        (status = 200, description = "Account disabled or invalid login details", content_type = "text/plain", body = String),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    current: Option<AuthenticatedUser>,
    AppForm(form): AppForm<LoginFormDto>,
) -> Result<Response> {
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match state.auth.authenticate(&username, &password).await? {
        LoginOutcome::Success(user) => {
            // A fresh token on every login; the previous session is dropped
            if let Some(current) = current {
                state.auth.logout(&current).await?;
            }
            let token = state.auth.login(&user).await?;
            Ok((
                [(header::SET_COOKIE, state.auth.cookie().set(&token)?)],
                Redirect::to(INDEX_URL),
            )
                .into_response())
        }
        LoginOutcome::Disabled => {
            tracing::warn!("Login refused for disabled account: {}", username);
            Ok(MSG_ACCOUNT_DISABLED.into_response())
        }
        LoginOutcome::InvalidCredentials => {
            tracing::warn!("Invalid login details: {}", username);
            Ok(MSG_INVALID_LOGIN.into_response())
        }
    }
}

/// End the current session and clear the cookie
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Logged out; redirect to the index page"),
    ),
    security(("session_cookie" = [])),
    tag = "auth"
)]
pub async fn logout(State(state): State<AppState>, user: AuthenticatedUser) -> Result<Response> {
    state.auth.logout(&user).await?;

    Ok((
        [(header::SET_COOKIE, state.auth.cookie().clear()?)],
        Redirect::to(INDEX_URL),
    )
        .into_response())
}
