use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::features::auth::services::AuthService;

/// Background worker that deletes expired login sessions
pub struct SessionCleaner {
    auth_service: Arc<AuthService>,
    every: Duration,
}

impl SessionCleaner {
    pub fn new(auth_service: Arc<AuthService>, every: Duration) -> Self {
        Self {
            auth_service,
            every,
        }
    }

    /// Run the cleaner in a background loop
    pub async fn run(&self) {
        tracing::info!("Starting session cleaner worker (every {:?})", self.every);

        let mut interval = interval(self.every);

        loop {
            interval.tick().await;

            match self.auth_service.purge_expired_sessions().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!("Removed {} expired sessions", removed),
                Err(e) => tracing::error!("Error removing expired sessions: {:?}", e),
            }
        }
    }
}
