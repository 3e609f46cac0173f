use axum::{extract::State, response::Html};
use minijinja::context;

use crate::core::error::Result;
use crate::core::state::AppState;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::MSG_RESTRICTED;

/// Index page: the most liked categories and the most viewed pages
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Index page", content_type = "text/html", body = String),
    ),
    tag = "home"
)]
pub async fn index(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
) -> Result<Html<String>> {
    render_index(&state, user.as_ref()).await
}

/// Render the index page; also shown after a category is added
pub async fn render_index(state: &AppState, user: Option<&AuthenticatedUser>) -> Result<Html<String>> {
    let categories = state.categories.top_categories().await?;
    let pages = state.pages.top_pages().await?;

    state.render(
        "rango/index.html",
        context! {
            user => user,
            categories => categories,
            pages => pages,
        },
    )
}

#[utoipa::path(
    get,
    path = "/about",
    responses(
        (status = 200, description = "About page", content_type = "text/html", body = String),
    ),
    tag = "home"
)]
pub async fn about(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
) -> Result<Html<String>> {
    state.render("rango/about.html", context! { user => user })
}

/// A page only logged-in users can see
#[utoipa::path(
    get,
    path = "/restricted",
    responses(
        (status = 200, description = "Restricted page", content_type = "text/html", body = String),
        (status = 303, description = "Not logged in; redirect to the login page"),
    ),
    security(("session_cookie" = [])),
    tag = "home"
)]
pub async fn restricted(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Html<String>> {
    let profile = state.users.profile(user.user_id).await?;
    let picture_url = profile.as_ref().and_then(|p| state.users.picture_url(p));

    state.render(
        "rango/restricted.html",
        context! {
            user => user,
            message => MSG_RESTRICTED,
            profile => profile,
            picture_url => picture_url,
        },
    )
}
