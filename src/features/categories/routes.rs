use axum::{routing::get, Router};

use crate::core::state::AppState;
use crate::features::categories::handlers;

/// Category pages anyone can see
pub fn routes() -> Router<AppState> {
    Router::new().route("/category/{slug}", get(handlers::show_category))
}

/// Category management; requires a logged-in user
pub fn protected_routes() -> Router<AppState> {
    Router::new().route(
        "/category/add",
        get(handlers::add_category_form).post(handlers::add_category),
    )
}
