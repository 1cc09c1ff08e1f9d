use std::{collections::HashMap, sync::Arc};

use {
    tokio::sync::{Mutex, RwLock, mpsc},
    tracing::debug,
};

use {squelch_presence::PeerRegistry, squelch_protocol::ServerEvent};

// ── Connected session ────────────────────────────────────────────────────────

/// One open WebSocket connection.
#[derive(Debug)]
pub struct ConnectedSession {
    pub session_id: String,
    /// Channel for sending serialized frames to this session's write loop.
    pub sender: mpsc::UnboundedSender<String>,
}

impl ConnectedSession {
    pub fn new(session_id: String, sender: mpsc::UnboundedSender<String>) -> Self {
        Self { session_id, sender }
    }

    /// Queue a serialized frame. Returns false if the write loop is gone
    /// (session closing concurrently) — callers absorb that as a no-op.
    pub fn send(&self, frame: &str) -> bool {
        self.sender.send(frame.to_string()).is_ok()
    }
}

// ── Gateway state ────────────────────────────────────────────────────────────

/// Shared relay state, wrapped in Arc for use across connection tasks.
pub struct GatewayState {
    /// All open sessions, keyed by session id.
    pub sessions: RwLock<HashMap<String, ConnectedSession>>,
    /// Registered peers. Only the router mutates this.
    pub registry: RwLock<PeerRegistry>,
    /// Serializes router dispatch (including disconnect handling) so no
    /// registration or disconnect interleaves mid-way through another's
    /// registry mutation and fan-out.
    pub dispatch_gate: Mutex<()>,
    /// Server version string.
    pub version: String,
}

impl GatewayState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            registry: RwLock::new(PeerRegistry::new()),
            dispatch_gate: Mutex::new(()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Track a newly accepted session.
    pub async fn register_session(&self, session: ConnectedSession) {
        let session_id = session.session_id.clone();
        self.sessions.write().await.insert(session_id, session);
    }

    /// Remove a session. Returns the removed entry if it was still open.
    pub async fn remove_session(&self, session_id: &str) -> Option<ConnectedSession> {
        self.sessions.write().await.remove(session_id)
    }

    /// Number of open sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Number of registered peers.
    pub async fn peer_count(&self) -> usize {
        self.registry.read().await.len()
    }

    /// Ids of every open session except `except` — raw connections, not
    /// the registry, so unregistered sessions are included.
    pub async fn other_session_ids(&self, except: &str) -> Vec<String> {
        self.sessions
            .read()
            .await
            .keys()
            .filter(|id| id.as_str() != except)
            .cloned()
            .collect()
    }

    /// Unicast to one session. A closed or unknown destination is
    /// absorbed silently (logged, not surfaced).
    pub async fn send_to(&self, session_id: &str, event: &ServerEvent) -> bool {
        let sessions = self.sessions.read().await;
        match sessions.get(session_id) {
            Some(session) => {
                let delivered = session.send(&event.to_json());
                if !delivered {
                    debug!(session = %session_id, "send to closing session dropped");
                }
                delivered
            },
            None => {
                debug!(session = %session_id, "send to unknown session dropped");
                false
            },
        }
    }

    /// Deliver to every open session except the sender, registered or
    /// not.
    pub async fn broadcast_except(&self, sender_id: &str, event: &ServerEvent) {
        let frame = event.to_json();
        let sessions = self.sessions.read().await;
        for (id, session) in sessions.iter() {
            if id == sender_id {
                continue;
            }
            if !session.send(&frame) {
                debug!(session = %id, "broadcast to closing session dropped");
            }
        }
    }
}
