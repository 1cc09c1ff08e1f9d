//! Per-connection WebSocket plumbing.
//!
//! Each accepted socket becomes two tasks: the read loop below and a
//! writer task draining the session's frame channel. The only
//! suspension points are awaiting the next inbound message and the
//! outbound socket send.

use std::{net::SocketAddr, sync::Arc};

use {
    axum::extract::ws::{Message, WebSocket},
    futures::{SinkExt, StreamExt},
    tokio::sync::mpsc,
    tracing::{debug, info},
};

use squelch_protocol::ClientEvent;

use crate::{
    router,
    state::{ConnectedSession, GatewayState},
};

/// Drive one upgraded WebSocket connection until it closes.
pub async fn handle_connection(socket: WebSocket, state: Arc<GatewayState>, addr: SocketAddr) {
    let session_id = uuid::Uuid::new_v4().to_string();
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Writer task: ends when the session's sender is dropped on
    // disconnect, or when the socket rejects a send.
    let writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    state
        .register_session(ConnectedSession::new(session_id.clone(), tx))
        .await;
    info!(session = %session_id, client = %addr, "session connected");

    while let Some(message) = ws_rx.next().await {
        match message {
            Ok(Message::Text(raw)) => match ClientEvent::from_json(&raw) {
                Ok(event) => router::handle_event(&state, &session_id, event).await,
                // Malformed frames never close the connection.
                Err(e) => debug!(session = %session_id, error = %e, "ignoring malformed event"),
            },
            Ok(Message::Close(_)) => break,
            // Ping/pong are answered by axum; binary frames carry
            // nothing in this protocol.
            Ok(_) => {},
            Err(e) => {
                debug!(session = %session_id, error = %e, "socket error, closing");
                break;
            },
        }
    }

    router::handle_disconnect(&state, &session_id).await;
    // Disconnect dropped the session's sender; the writer drains what
    // is left and exits.
    let _ = writer.await;
    info!(session = %session_id, "session disconnected");
}
