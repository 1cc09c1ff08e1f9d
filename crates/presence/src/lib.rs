//! Peer presence registry.
//!
//! The one piece of durable (in-memory) state in the relay: which open
//! sessions have claimed a nickname. Empty at process start, mutated
//! only by the gateway router, gone on restart. The gateway owns a
//! single registry behind a lock; this type itself is plain single-
//! threaded state.

use serde::{Deserialize, Serialize};

/// A session that has registered with a nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub id: String,
    pub nickname: String,
}

/// Session-id → peer store, preserving registration order.
///
/// Backed by a `Vec` rather than a map: snapshots must list peers in a
/// stable order (first registration wins the slot, re-registration
/// updates it in place), and the peer count is small enough that linear
/// lookup is a non-issue.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: Vec<Peer>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the peer for `session_id`. Re-registering
    /// keeps the peer's position but replaces its nickname.
    pub fn register(&mut self, session_id: &str, nickname: &str) {
        match self.peers.iter_mut().find(|p| p.id == session_id) {
            Some(peer) => peer.nickname = nickname.to_string(),
            None => self.peers.push(Peer {
                id: session_id.to_string(),
                nickname: nickname.to_string(),
            }),
        }
    }

    /// Remove and return the peer for `session_id`, if it ever
    /// registered.
    pub fn unregister(&mut self, session_id: &str) -> Option<Peer> {
        let idx = self.peers.iter().position(|p| p.id == session_id)?;
        Some(self.peers.remove(idx))
    }

    pub fn lookup(&self, session_id: &str) -> Option<&Peer> {
        self.peers.iter().find(|p| p.id == session_id)
    }

    /// Point-in-time copy of all registered peers, in registration
    /// order. Later mutation does not affect the returned sequence.
    pub fn snapshot(&self) -> Vec<Peer> {
        self.peers.clone()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_lookup() {
        let mut registry = PeerRegistry::new();
        registry.register("s1", "Alice");
        assert_eq!(registry.lookup("s1").map(|p| p.nickname.as_str()), Some("Alice"));
        assert!(registry.lookup("s2").is_none());
    }

    #[test]
    fn reregister_latest_nickname_wins() {
        let mut registry = PeerRegistry::new();
        registry.register("s1", "Alice");
        registry.register("s1", "Alicia");
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup("s1").map(|p| p.nickname.as_str()),
            Some("Alicia")
        );
    }

    #[test]
    fn reregister_keeps_snapshot_position() {
        let mut registry = PeerRegistry::new();
        registry.register("s1", "Alice");
        registry.register("s2", "Bob");
        registry.register("s1", "Alicia");
        let names: Vec<_> = registry.snapshot().into_iter().map(|p| p.nickname).collect();
        assert_eq!(names, ["Alicia", "Bob"]);
    }

    #[test]
    fn unregister_returns_prior_entry() {
        let mut registry = PeerRegistry::new();
        registry.register("s1", "Alice");
        let removed = registry.unregister("s1");
        assert_eq!(
            removed,
            Some(Peer {
                id: "s1".into(),
                nickname: "Alice".into()
            })
        );
        assert!(registry.lookup("s1").is_none());
        assert!(registry.unregister("s1").is_none());
    }

    #[test]
    fn unregister_never_registered_is_none() {
        let mut registry = PeerRegistry::new();
        assert!(registry.unregister("ghost").is_none());
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut registry = PeerRegistry::new();
        registry.register("s1", "Alice");
        let snap = registry.snapshot();
        registry.register("s2", "Bob");
        registry.unregister("s1");
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].id, "s1");
    }

    #[test]
    fn snapshot_includes_just_added_entry() {
        let mut registry = PeerRegistry::new();
        registry.register("s1", "Alice");
        registry.register("s2", "Bob");
        assert!(registry.snapshot().iter().any(|p| p.id == "s2"));
    }
}
