//! WebSocket handler
//!
//! Bridges one upgraded socket to the relay hub: a reader task feeding
//! text frames to the hub and a writer task draining the session's
//! outbound queue.

use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let max_frame_bytes = state.config().relay.max_frame_bytes;
    ws.max_message_size(max_frame_bytes)
        .max_frame_size(max_frame_bytes)
        .on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let handle = state.handles().generate();

    // Register before the queue exists so a rejected handle never receives
    if let Err(e) = state.hub().on_connect(handle) {
        tracing::error!(handle = %handle, error = %e, "Refusing connection");
        return;
    }

    let relay = &state.config().relay;
    let (tx, mut rx) = mpsc::channel::<String>(relay.outbound_buffer);
    let send_timeout = relay.send_timeout();
    state.sessions().add_session(handle, tx);

    tracing::info!(handle = %handle, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let hub = state.hub().clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => hub.on_frame(handle, &text),
                Ok(Message::Binary(_)) => {
                    tracing::debug!(handle = %handle, "Ignoring binary frame");
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Pong is handled automatically by axum
                    tracing::trace!(handle = %handle, "Ping/pong received");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(handle = %handle, "Client closed connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!(handle = %handle, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match timeout(send_timeout, ws_sink.send(Message::Text(frame))).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(handle = %handle, error = %e, "Failed to write frame");
                    break;
                }
                Err(_) => {
                    tracing::warn!(
                        handle = %handle,
                        timeout_ms = send_timeout.as_millis(),
                        "Frame write timed out"
                    );
                    break;
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    // Wait for either side to finish, then stop the other
    tokio::select! {
        _ = &mut recv_task => {
            tracing::debug!(handle = %handle, "Receive task ended");
            send_task.abort();
        }
        _ = &mut send_task => {
            tracing::debug!(handle = %handle, "Send task ended");
            recv_task.abort();
        }
    }

    cleanup_connection(&state, handle);
}

/// Forget a closed session; the hub runs the leave for it exactly once
fn cleanup_connection(state: &GatewayState, handle: relay_core::ConnectionHandle) {
    tracing::info!(handle = %handle, "Cleaning up connection");

    state.sessions().remove_session(handle);
    state.hub().on_disconnect(handle);
}
