use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

// ── Peer info ────────────────────────────────────────────────────────────────

/// A registered peer as it appears in `peer-list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    pub id: String,
    pub nickname: String,
}

// ── Inbound events ───────────────────────────────────────────────────────────

/// Events a client may send. Disconnect is implicit (socket close), not
/// a frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Claim a nickname. Repeating this replaces the previous nickname
    /// and re-runs the full join announcement.
    Register { nickname: String },
    /// Ask the server which other sessions are open; the server answers
    /// with one `create-offer` per target, all sent back to the caller.
    OfferBroadcast,
    /// Relay a session description to one session.
    Offer { to: String, offer: Value },
    /// Relay the answering session description back.
    Answer { to: String, answer: Value },
    /// Relay a connectivity candidate. Without `to` the event is
    /// dropped — the target is never inferred.
    IceCandidate {
        #[serde(default)]
        to: Option<String>,
        candidate: Value,
    },
    /// Sender started transmitting audio.
    PttStart,
    /// Sender stopped transmitting audio.
    PttStop,
}

// ── Outbound events ──────────────────────────────────────────────────────────

/// Events the server delivers, unicast or broadcast-except-sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Current registry snapshot, sent to a session right after it
    /// registers. Includes the registrant itself.
    PeerList { peers: Vec<PeerInfo> },
    PeerJoined { id: String, nickname: String },
    PeerLeft { id: String, nickname: String },
    /// Instruction to the `offer-broadcast` caller to originate one
    /// offer for the named session.
    CreateOffer { to: String },
    Offer { from: String, offer: Value },
    Answer { from: String, answer: Value },
    IceCandidate { from: String, candidate: Value },
    PttStart { from: String, nickname: String },
    PttStop { from: String, nickname: String },
}
