//! Gateway: WebSocket signaling relay for peer-to-peer sessions.
//!
//! Lifecycle:
//! 1. Bind the HTTP listener (`/health`, `/ws`)
//! 2. Upgrade each `/ws` request into a session with a fresh UUID
//! 3. Decode inbound frames and hand them to the router
//! 4. Router consults/mutates the peer registry and fans deliveries
//!    back out through per-session writer channels
//!
//! The relay never interprets offer/answer/candidate payloads and holds
//! no state beyond the open-session map and the peer registry.

pub mod router;
pub mod server;
pub mod state;
pub mod ws;
