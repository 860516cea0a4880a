//! WebSocket connection handler.
//!
//! The transport assigns each connection an opaque id, subscribes its
//! outbound channel to both broadcast topics, and feeds parsed envelopes to
//! the coordinator one at a time. Processing an envelope to completion
//! before reading the next frame is what preserves per-connection
//! Join → Chat/Typing → Leave ordering.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::Topic;
use crate::infrastructure::dto::websocket::EnvelopeFrame;
use crate::ui::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Opaque connection id, stable for the lifetime of this connection.
    let connection_id = Uuid::new_v4().to_string();
    tracing::info!("WebSocket connection opened: {}", connection_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink.
///
/// The task ends when the channel closes, which happens once the
/// broadcaster drops the last sender on unsubscribe.
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

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: String) {
    let (sender, mut receiver) = socket.split();

    // Every client receives both chat/presence envelopes and count updates.
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .broadcaster
        .subscribe(connection_id.clone(), [Topic::Public, Topic::UserCount], tx)
        .await;

    let push_task = pusher_loop(rx, sender);

    // One envelope at a time: each inbound frame is processed to completion
    // before the next is read from this connection.
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on connection '{}': {}", connection_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                let frame = match serde_json::from_str::<EnvelopeFrame>(&text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!(
                            "Dropping malformed frame from connection '{}': {}",
                            connection_id,
                            e
                        );
                        continue;
                    }
                };
                state
                    .coordinator
                    .handle_inbound(&connection_id, frame.into())
                    .await;
            }
            Message::Close(_) => break,
            // Ping/Pong are handled by axum, binary frames are not part of
            // the protocol.
            _ => {}
        }
    }

    tracing::info!("WebSocket connection closed: {}", connection_id);

    // Leave cleanup, then drop the outbound channel so the pusher task ends.
    state.coordinator.handle_disconnect(&connection_id).await;
    state.broadcaster.unsubscribe(&connection_id).await;

    let _ = push_task.await;
}
