//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and runs one dashboard session per
//! connection. Messages of a session are processed in arrival order against
//! the session's own input state.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::SessionHub;
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::views::{Dashboard, InputState};

/// WebSocket upgrade handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.sessions);
    let dashboard = Arc::clone(&state.dashboard);
    ws.on_upgrade(move |socket| handle_socket(socket, hub, dashboard))
}

/// Encode a server message as a text frame
fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(text) => Some(Message::Text(text)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            None
        }
    }
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, hub: Arc<SessionHub>, dashboard: Arc<Dashboard>) {
    let (mut sender, mut receiver) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let session_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, limit = hub.max_sessions(), "Rejected WebSocket session");
            let error_msg = ServerMessage::Error {
                message: e.to_string(),
            };
            if let Some(frame) = encode(&error_msg) {
                let _ = sender.send(frame).await;
            }
            return;
        }
    };

    // Connected first, then the initial render of every node
    let mut input = dashboard.initial_state();
    let _ = hub
        .send_to(
            &session_id,
            ServerMessage::Connected {
                session_id: session_id.clone(),
            },
        )
        .await;
    let _ = hub
        .send_to(
            &session_id,
            ServerMessage::Update {
                outputs: dashboard.render_all(&input),
            },
        )
        .await;

    let sid_for_send = session_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Some(frame) = encode(&msg) else {
                continue;
            };
            if sender.send(frame).await.is_err() {
                tracing::debug!(
                    session_id = %sid_for_send,
                    "WebSocket send failed, closing session"
                );
                break;
            }
        }
    });

    let hub_for_recv = Arc::clone(&hub);
    let sid_for_recv = session_id.clone();

    // Task to receive messages from WebSocket and dispatch them
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    let keep_open = handle_ws_message(
                        &hub_for_recv,
                        &dashboard,
                        &sid_for_recv,
                        &mut input,
                        msg,
                    )
                    .await;
                    if !keep_open {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %sid_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    hub.unregister(&session_id).await;
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(
    hub: &SessionHub,
    dashboard: &Dashboard,
    session_id: &str,
    input: &mut InputState,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    if let Some(reply) = handle_client_message(dashboard, input, client_msg) {
                        let _ = hub.send_to(session_id, reply).await;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_id,
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    // Send error but keep connection open
                    let error_msg = ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    let _ = hub.send_to(session_id, error_msg).await;
                }
            }
            true
        }
        Message::Binary(_) => {
            let error_msg = ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            };
            let _ = hub.send_to(session_id, error_msg).await;
            true
        }
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(session_id = %session_id, "Client requested close");
            false
        }
    }
}

/// Apply a parsed client message to the session, returning the reply
fn handle_client_message(
    dashboard: &Dashboard,
    input: &mut InputState,
    message: ClientMessage,
) -> Option<ServerMessage> {
    match message {
        ClientMessage::Ping => Some(ServerMessage::Pong),
        ClientMessage::Refresh => Some(ServerMessage::Update {
            outputs: dashboard.render_all(input),
        }),
        other => {
            let event = other.into_event()?;
            let outputs = dashboard.dispatch(input, event);
            if outputs.is_empty() {
                None
            } else {
                Some(ServerMessage::Update { outputs })
            }
        }
    }
}
