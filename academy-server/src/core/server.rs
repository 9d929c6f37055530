//! Server Implementation
//!
//! HTTP 服务器启动和管理

use tokio::net::TcpListener;

use crate::api;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Serve until Ctrl-C, then drain in-flight requests and close the pool
    pub async fn run(&self) -> Result<()> {
        if self.config.db_max_connections == 0 {
            return Err(ServerError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }

        let state = ServerState::initialize(&self.config).await?;

        let app = api::build_app(&state).with_state(state.clone());

        let addr = format!("0.0.0.0:{}", self.config.http_port);
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(
            "Course Academy listening on {} (env: {})",
            listener.local_addr()?,
            self.config.environment
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        state.db.close().await;
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
