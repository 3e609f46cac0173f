use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::SwaggerConfig;
use crate::core::error::AppError;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::state::AppState;
use crate::features::{auth, categories, home, pages, users};

/// Simple health check endpoint (no auth required)
async fn health_check() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

/// Assemble every page route, the media files and the health check.
///
/// The session middleware runs for all pages so templates always know who
/// is logged in; login-only pages additionally pass through `require_login`.
pub fn build_router(
    state: AppState,
    media_url: &str,
    media_root: &Path,
    max_request_body_size: usize,
) -> Router {
    let protected_routes = Router::new()
        .merge(home::routes::protected_routes())
        .merge(categories::routes::protected_routes())
        .merge(pages::routes::protected_routes())
        .merge(auth::routes::protected_routes())
        .route_layer(from_fn(middleware::require_login));

    let public_routes = Router::new()
        .merge(home::routes::routes())
        .merge(categories::routes::routes())
        .merge(auth::routes::public_routes())
        .merge(users::routes::routes());

    let pages = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(from_fn_with_state(
            Arc::clone(&state.auth),
            middleware::session_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(pages)
        .nest_service(media_url, ServeDir::new(media_root))
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_request_body_size))
}

/// Swagger UI and the OpenAPI document, behind basic auth when credentials are set
pub fn swagger_router(config: &SwaggerConfig) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    if let Some(credentials) = config.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        swagger.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        swagger
    }
}
