//! Realtime Change Feed Protocol
//!
//! Transport-free half of the change feed: Phoenix channel framing and the
//! per-channel session that turns inbound frames into `FeedSignal`s. The
//! browser binding only moves strings between a WebSocket and this module.

mod frame;
mod session;

pub use frame::{decode_change, Frame};
pub use session::{FeedSession, HeartbeatTick, CHANNEL_NAME, HEARTBEAT_INTERVAL_MS, LEADS_TABLE};
