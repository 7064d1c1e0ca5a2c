//! Channel Session
//!
//! Tracks one `postgres_changes` channel over a socket: outgoing refs, the
//! join handshake, heartbeat acknowledgements and the connectivity status.

use serde_json::{json, Value};

use super::frame::{
    decode_change, Frame, HEARTBEAT, PHOENIX_TOPIC, PHX_CLOSE, PHX_ERROR, PHX_JOIN, PHX_LEAVE,
    PHX_REPLY, POSTGRES_CHANGES, SYSTEM,
};
use crate::config::DashboardConfig;
use crate::domain::ConnectivityStatus;
use crate::error::DashboardResult;
use crate::feed::FeedSignal;

/// Channel name shared by every dashboard tab
pub const CHANNEL_NAME: &str = "leads-realtime";
pub const LEADS_TABLE: &str = "leads";
pub const HEARTBEAT_INTERVAL_MS: u32 = 25_000;

/// What to do when the heartbeat timer fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeartbeatTick {
    /// Write this frame to the socket
    Send(String),
    /// The previous heartbeat was never acknowledged
    TimedOut,
}

#[derive(Debug)]
pub struct FeedSession {
    topic: String,
    table: String,
    access_token: String,
    next_ref: u64,
    join_ref: Option<String>,
    pending_heartbeat: Option<String>,
    status: ConnectivityStatus,
}

impl FeedSession {
    pub fn new(table: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            topic: format!("realtime:{CHANNEL_NAME}"),
            table: table.into(),
            access_token: access_token.into(),
            next_ref: 0,
            join_ref: None,
            pending_heartbeat: None,
            status: ConnectivityStatus::Connecting,
        }
    }

    /// Session on the `leads` table authenticated with the configured key
    pub fn for_leads(config: &DashboardConfig) -> Self {
        Self::new(LEADS_TABLE, config.anon_key())
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn status(&self) -> ConnectivityStatus {
        self.status
    }

    fn make_ref(&mut self) -> String {
        self.next_ref += 1;
        self.next_ref.to_string()
    }

    /// Move to `status`, yielding a signal only when it actually changed
    pub fn transition(&mut self, status: ConnectivityStatus) -> Option<FeedSignal> {
        if self.status == status {
            return None;
        }
        log::info!("[REALTIME] {:?} -> {:?}", self.status, status);
        self.status = status;
        Some(FeedSignal::Status(status))
    }

    pub fn join_frame(&mut self) -> DashboardResult<String> {
        let reference = self.make_ref();
        self.join_ref = Some(reference.clone());
        let payload = json!({
            "config": {
                "broadcast": { "ack": false, "self": false },
                "presence": { "key": "" },
                "postgres_changes": [
                    { "event": "*", "schema": "public", "table": self.table }
                ],
                "private": false
            },
            "access_token": self.access_token,
        });
        Frame::new(self.topic.clone(), PHX_JOIN, payload)
            .with_ref(reference.clone())
            .with_join_ref(Some(reference))
            .encode()
    }

    pub fn heartbeat(&mut self) -> DashboardResult<HeartbeatTick> {
        if let Some(unacked) = &self.pending_heartbeat {
            log::warn!("[REALTIME] Heartbeat {unacked} was never acknowledged");
            return Ok(HeartbeatTick::TimedOut);
        }
        let reference = self.make_ref();
        self.pending_heartbeat = Some(reference.clone());
        Frame::new(PHOENIX_TOPIC, HEARTBEAT, json!({}))
            .with_ref(reference)
            .encode()
            .map(HeartbeatTick::Send)
    }

    pub fn leave_frame(&mut self) -> DashboardResult<String> {
        let reference = self.make_ref();
        Frame::new(self.topic.clone(), PHX_LEAVE, json!({}))
            .with_ref(reference)
            .with_join_ref(self.join_ref.clone())
            .encode()
    }

    /// Interpret one inbound text frame
    pub fn handle_frame(&mut self, text: &str) -> DashboardResult<Vec<FeedSignal>> {
        let frame = Frame::decode(text)?;

        if frame.topic == PHOENIX_TOPIC {
            if frame.event == PHX_REPLY && frame.reference.is_some() && frame.reference == self.pending_heartbeat {
                self.pending_heartbeat = None;
            }
            return Ok(Vec::new());
        }
        if frame.topic != self.topic {
            return Ok(Vec::new());
        }

        let signal = match frame.event.as_str() {
            PHX_REPLY if frame.reference.is_some() && frame.reference == self.join_ref => {
                if frame.payload_status() == Some("ok") {
                    self.transition(ConnectivityStatus::Subscribed)
                } else {
                    log::error!("[REALTIME] Join rejected: {}", response_of(&frame));
                    self.transition(ConnectivityStatus::ChannelError)
                }
            }
            POSTGRES_CHANGES => decode_change(&frame.payload, &self.table)?.map(FeedSignal::Change),
            SYSTEM if frame.payload_status() == Some("error") => {
                log::error!("[REALTIME] System error: {}", frame.payload);
                self.transition(ConnectivityStatus::ChannelError)
            }
            PHX_ERROR => self.transition(ConnectivityStatus::ChannelError),
            PHX_CLOSE => self.transition(ConnectivityStatus::Closed),
            _ => None,
        };
        Ok(signal.into_iter().collect())
    }
}

fn response_of(frame: &Frame) -> &Value {
    frame.payload.get("response").unwrap_or(&frame.payload)
}
