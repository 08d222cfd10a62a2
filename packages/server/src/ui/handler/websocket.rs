//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Identity, UserName},
    ui::state::AppState,
    usecase::SendError,
};

/// Query parameters for WebSocket connection.
///
/// The identity is verified by the auth gate in front of this server;
/// by the time the upgrade reaches us it is trusted.
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub user_name: String,
    pub nick_name: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> UserName (Domain Model)
    let user_name = match UserName::try_from(query.user_name.clone()) {
        Ok(name) => name,
        Err(_) => {
            tracing::warn!("Invalid user_name: '{}'", query.user_name);
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    let identity = Identity::new(user_name, query.nick_name);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity)))
}

/// Spawns a task that drains the connection's push channel and writes each
/// string as one WebSocket text frame, preserving queue order.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: Identity) {
    let connection = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    let (sender, mut receiver) = socket.split();

    // Register first, so the history replay and the following broadcasts
    // reach this connection through its own push channel.
    if let Err(e) = state
        .open_connection_usecase
        .execute(connection, identity.clone(), tx)
        .await
    {
        tracing::error!(
            "Failed to open connection for user '{}': {}",
            identity.user_name(),
            e
        );
        state.close_connection_usecase.execute(connection).await;
        return;
    }

    let state_clone = state.clone();
    let identity_clone = identity.clone();

    // Task receiving frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match state_clone
                        .send_message_usecase
                        .execute(&identity_clone, &text)
                        .await
                    {
                        Ok(()) => {}
                        Err(SendError::MalformedCommand) => {
                            tracing::warn!(
                                "Dropping malformed frame from user '{}'",
                                identity_clone.user_name()
                            );
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to handle message from user '{}': {}",
                                identity_clone.user_name(),
                                e
                            );
                        }
                    }
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("User '{}' requested close", identity_clone.user_name());
                    break;
                }
                _ => {}
            }
        }
    });

    // Task pushing queued frames to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.close_connection_usecase.execute(connection).await;
}
