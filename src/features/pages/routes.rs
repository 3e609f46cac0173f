use axum::{routing::get, Router};

use crate::core::state::AppState;
use crate::features::pages::handlers;

/// Page management; requires a logged-in user
pub fn protected_routes() -> Router<AppState> {
    Router::new().route(
        "/category/{slug}/add_page",
        get(handlers::add_page_form).post(handlers::add_page),
    )
}
