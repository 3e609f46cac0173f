mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::router::{build_router, swagger_router};
use crate::core::state::AppState;
use crate::core::{database, middleware, seed};
use crate::features::auth::password::PasswordHasher;
use crate::features::auth::repositories::PgSessionRepository;
use crate::features::auth::session::SessionCookie;
use crate::features::auth::{AuthService, SessionCleaner};
use crate::features::categories::repositories::PgCategoryRepository;
use crate::features::categories::CategoryService;
use crate::features::pages::repositories::PgPageRepository;
use crate::features::pages::PageService;
use crate::features::users::repositories::PgUserRepository;
use crate::features::users::UserService;
use crate::modules::storage::MediaStorage;
use crate::shared::templates::Templates;
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Templates are loaded once and shared by every handler
    let templates = Arc::new(
        Templates::load(&config.app.template_dir)
            .map_err(|e| anyhow::anyhow!("Failed to load templates: {}", e))?,
    );

    // Local media storage for profile pictures
    let media_storage = Arc::new(MediaStorage::new(&config.media));
    media_storage
        .ensure_root_exists()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare media root: {}", e))?;

    // Repositories
    let category_repository = Arc::new(PgCategoryRepository::new(pool.clone()));
    let page_repository = Arc::new(PgPageRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let session_repository = Arc::new(PgSessionRepository::new(pool.clone()));

    // Services
    let hasher = PasswordHasher::new(config.auth.password_hash_iterations);
    let category_service = Arc::new(CategoryService::new(category_repository));
    let page_service = Arc::new(PageService::new(page_repository));
    let user_service = Arc::new(UserService::new(
        user_repository.clone(),
        Arc::clone(&media_storage),
        hasher,
        config.media.max_upload_size,
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        session_repository,
        hasher,
        SessionCookie {
            name: config.auth.session_cookie_name.clone(),
            max_age: config.auth.session_ttl,
            secure: config.auth.secure_cookies,
        },
    ));
    tracing::info!("Services initialized");

    if config.app.seed_sample_data {
        seed::seed_sample_data(&category_service, &page_service)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed sample data: {}", e))?;
    }

    // Spawn the expired session cleaner
    let session_cleaner = SessionCleaner::new(
        Arc::clone(&auth_service),
        config.auth.session_cleanup_interval,
    );
    tokio::spawn(async move {
        session_cleaner.run().await;
    });
    tracing::info!("Session cleaner worker spawned");

    let state = AppState {
        templates,
        categories: category_service,
        pages: page_service,
        users: user_service,
        auth: auth_service,
    };

    let app = Router::new()
        .merge(swagger_router(&config.swagger))
        .merge(build_router(
            state,
            &config.media.url_prefix,
            media_storage.root(),
            config.app.max_request_body_size,
        ))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
