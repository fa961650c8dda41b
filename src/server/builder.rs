//! ServerBuilder for fluent API to build HTTP servers

use super::router::build_router;
use super::state::AppState;
use crate::config::AppConfig;
use crate::core::error::RestaurantResult;
use crate::core::{AuthProvider, NoAuthProvider, StaticTokenProvider};
use crate::storage::Stores;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Default per-request deadline
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

/// Builder for the restaurant HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_stores(Stores::in_memory())
///     .with_auth_provider(StaticTokenProvider::new(["s3cret"]))
///     .build()?;
/// ```
pub struct ServerBuilder {
    stores: Option<Stores>,
    auth: Arc<dyn AuthProvider>,
    request_timeout: Duration,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    ///
    /// Authentication is off until an auth provider is set.
    pub fn new() -> Self {
        Self {
            stores: None,
            auth: Arc::new(NoAuthProvider),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Prepare a builder from loaded configuration, opening the storage backend
    pub async fn from_config(config: &AppConfig) -> RestaurantResult<Self> {
        let stores = Stores::open(&config.storage).await?;
        let mut builder = Self::new()
            .with_stores(stores)
            .with_request_timeout(config.server.request_timeout());

        if config.auth.tokens.is_empty() {
            tracing::warn!("no auth tokens configured, authentication is disabled");
        } else {
            builder = builder.with_auth_provider(StaticTokenProvider::new(config.auth.tokens.clone()));
        }

        Ok(builder)
    }

    /// Set the store bundle (required)
    pub fn with_stores(mut self, stores: Stores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Replace the auth provider
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth = Arc::new(provider);
        self
    }

    /// Set the per-request deadline
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the handler state
    pub fn build_state(self) -> Result<AppState> {
        let stores = self
            .stores
            .ok_or_else(|| anyhow::anyhow!("Stores are required. Call .with_stores()"))?;
        Ok(AppState::new(&stores, self.auth, self.request_timeout))
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
///
/// A signal handler that cannot be installed never fires; the other one
/// still can.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
