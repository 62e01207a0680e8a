//! HTTP server startup and graceful shutdown

use anyhow::Context;

use crate::api;
use crate::core::{BackgroundTasks, Config, ServerState};

pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = self.state.clone();

        let mut tasks = BackgroundTasks::new();
        state.start_background_tasks(&mut tasks);
        tracing::info!(count = tasks.len(), "Background tasks started");

        let app = api::build_app(&state).with_state(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(environment = %self.config.environment, "Storefront server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .context("HTTP server failed")?;

        tasks.shutdown().await;
        Ok(())
    }
}
