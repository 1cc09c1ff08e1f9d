//! Wire protocol for the squelch signaling relay.
//!
//! One WebSocket text frame carries one JSON event, tagged by a `type`
//! field. Inbound events ([`ClientEvent`]) are dispatched by the gateway
//! router; outbound events ([`ServerEvent`]) are delivered unicast or
//! broadcast. Session-description and ICE payloads are opaque
//! [`serde_json::Value`]s — the relay never looks inside them.

pub mod events;

pub use events::{ClientEvent, PeerInfo, ServerEvent};

/// Nickname used in `ptt-*` broadcasts when the sender never registered.
pub const UNKNOWN_NICKNAME: &str = "Unknown";

/// Failure to decode an inbound frame. Never fatal: the gateway logs it
/// and keeps the connection open.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed client event: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ClientEvent {
    /// Decode a single inbound text frame.
    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl ServerEvent {
    /// Serialize for delivery. Outbound events are built from our own
    /// types, so serialization cannot fail on well-formed input; a
    /// failure here would be a bug, reported as the error frame below
    /// rather than a panic.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"type":"error","message":"encode: {e}"}}"#))
    }
}
