use axum::{routing::get, Router};

use crate::core::state::AppState;
use crate::features::users::handlers;

/// Registration is open to everyone
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/register",
        get(handlers::register_form).post(handlers::register),
    )
}
