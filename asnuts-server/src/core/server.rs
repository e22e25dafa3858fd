//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;
use std::time::Duration;

use crate::api::build_app;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("AS Nuts server listening on {}", addr);

        let app = build_app(state);
        let shutdown_timeout = Duration::from_millis(self.config.shutdown_timeout_ms);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
            .await
            .map_err(|e| ServerError::Internal(e.into()))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal(timeout: Duration) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!(
        timeout_ms = timeout.as_millis() as u64,
        "Shutting down, draining in-flight requests..."
    );
    // 超时后强制退出
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        tracing::warn!("Graceful shutdown timed out, exiting");
        std::process::exit(0);
    });
}
