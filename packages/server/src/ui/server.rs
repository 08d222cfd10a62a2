//! axum ベースの HTTP / WebSocket サーバー

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::handler::{debug_presence, health_check, websocket_handler};
use super::signal::shutdown_signal;
use super::state::AppState;

pub struct Server {
    host: String,
    port: u16,
    state: Arc<AppState>,
}

impl Server {
    pub fn new(host: String, port: u16, state: Arc<AppState>) -> Self {
        Self { host, port, state }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/ws", get(websocket_handler))
            .route("/api/health", get(health_check))
            .route("/debug/presence", get(debug_presence))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind and serve until a shutdown signal arrives.
    pub async fn run(&self) -> Result<(), std::io::Error> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
