use axum::{routing::get, Router};

use crate::core::state::AppState;
use crate::features::home::handlers;

/// Pages anyone can see
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/about", get(handlers::about))
}

/// Pages that require a logged-in user
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/restricted", get(handlers::restricted))
}
