//! Signaling router: classifies inbound events and turns them into
//! registry mutations plus zero or more deliveries.
//!
//! The router is stateless; everything it touches lives in
//! [`GatewayState`]. Dispatch is serialized through the state's
//! `dispatch_gate` so registry mutation and the resulting fan-out are
//! atomic with respect to concurrent registrations and disconnects.

use std::sync::Arc;

use tracing::{debug, info};

use squelch_protocol::{ClientEvent, PeerInfo, ServerEvent, UNKNOWN_NICKNAME};

use crate::state::GatewayState;

/// Handle one decoded inbound event from `session_id`.
pub async fn handle_event(state: &Arc<GatewayState>, session_id: &str, event: ClientEvent) {
    let _gate = state.dispatch_gate.lock().await;

    match event {
        ClientEvent::Register { nickname } => register(state, session_id, nickname).await,
        ClientEvent::OfferBroadcast => offer_broadcast(state, session_id).await,
        ClientEvent::Offer { to, offer } => {
            debug!(from = %session_id, to = %to, "relaying offer");
            state
                .send_to(&to, &ServerEvent::Offer {
                    from: session_id.to_string(),
                    offer,
                })
                .await;
        },
        ClientEvent::Answer { to, answer } => {
            debug!(from = %session_id, to = %to, "relaying answer");
            state
                .send_to(&to, &ServerEvent::Answer {
                    from: session_id.to_string(),
                    answer,
                })
                .await;
        },
        ClientEvent::IceCandidate { to, candidate } => match to {
            Some(to) => {
                state
                    .send_to(&to, &ServerEvent::IceCandidate {
                        from: session_id.to_string(),
                        candidate,
                    })
                    .await;
            },
            // Target is never inferred and candidates are never broadcast.
            None => debug!(from = %session_id, "ice-candidate without target dropped"),
        },
        ClientEvent::PttStart => ptt(state, session_id, true).await,
        ClientEvent::PttStop => ptt(state, session_id, false).await,
    }
}

/// Handle the implicit disconnect transition for `session_id`.
///
/// Removes the session, unregisters it, and announces `peer-left` to
/// the remaining open connections — but only if the session had
/// registered. Unregistered sessions leave silently.
pub async fn handle_disconnect(state: &Arc<GatewayState>, session_id: &str) {
    let _gate = state.dispatch_gate.lock().await;

    state.remove_session(session_id).await;
    let removed = state.registry.write().await.unregister(session_id);
    if let Some(peer) = removed {
        info!(session = %session_id, nickname = %peer.nickname, "peer left");
        state
            .broadcast_except(session_id, &ServerEvent::PeerLeft {
                id: peer.id,
                nickname: peer.nickname,
            })
            .await;
    }
}

/// `register`: record the nickname, send the registrant the current
/// peer list (which already includes it), and announce the join to
/// every other open connection — registered or not.
///
/// A repeated `register` from the same session re-runs all of this,
/// including the join announcement.
async fn register(state: &Arc<GatewayState>, session_id: &str, nickname: String) {
    let snapshot = {
        let mut registry = state.registry.write().await;
        registry.register(session_id, &nickname);
        registry.snapshot()
    };
    info!(session = %session_id, nickname = %nickname, "peer registered");

    let peers = snapshot
        .into_iter()
        .map(|p| PeerInfo {
            id: p.id,
            nickname: p.nickname,
        })
        .collect();
    state
        .send_to(session_id, &ServerEvent::PeerList { peers })
        .await;

    state
        .broadcast_except(session_id, &ServerEvent::PeerJoined {
            id: session_id.to_string(),
            nickname,
        })
        .await;
}

/// `offer-broadcast`: tell the caller to originate one offer per other
/// open session. The target set is the raw connection set, not the
/// registry. The server never builds offer content itself.
async fn offer_broadcast(state: &Arc<GatewayState>, session_id: &str) {
    let targets = state.other_session_ids(session_id).await;
    debug!(session = %session_id, targets = targets.len(), "offer fan-out requested");
    for target in targets {
        state
            .send_to(session_id, &ServerEvent::CreateOffer { to: target })
            .await;
    }
}

/// `ptt-start` / `ptt-stop`: broadcast voice activity with the sender's
/// nickname, falling back to a sentinel for unregistered sessions.
/// Concurrent talkers are not arbitrated.
async fn ptt(state: &Arc<GatewayState>, session_id: &str, start: bool) {
    let nickname = state
        .registry
        .read()
        .await
        .lookup(session_id)
        .map(|p| p.nickname.clone())
        .unwrap_or_else(|| UNKNOWN_NICKNAME.to_string());
    debug!(session = %session_id, nickname = %nickname, start, "ptt");

    let from = session_id.to_string();
    let event = if start {
        ServerEvent::PttStart { from, nickname }
    } else {
        ServerEvent::PttStop { from, nickname }
    };
    state.broadcast_except(session_id, &event).await;
}
