use axum::{routing::get, Router};

use crate::core::state::AppState;
use crate::features::auth::handlers;

/// Public auth routes (no authentication required)
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", get(handlers::login_form).post(handlers::login))
}

/// Protected auth routes (require a logged-in user)
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/logout", get(handlers::logout))
}
