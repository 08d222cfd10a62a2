//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint exposing the current presence roster (for testing purposes)
pub async fn debug_presence(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let online: Vec<String> = state
        .presence
        .snapshot()
        .await
        .into_iter()
        .map(|user| user.into_string())
        .collect();
    Json(serde_json::json!({ "online": online }))
}
