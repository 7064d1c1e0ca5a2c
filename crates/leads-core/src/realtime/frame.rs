//! Phoenix Frames
//!
//! `vsn=1.0.0` JSON framing: `{topic, event, payload, ref, join_ref}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ChangeEvent, Lead};
use crate::error::{DashboardError, DashboardResult};

pub(crate) const PHOENIX_TOPIC: &str = "phoenix";
pub(crate) const PHX_JOIN: &str = "phx_join";
pub(crate) const PHX_LEAVE: &str = "phx_leave";
pub(crate) const PHX_REPLY: &str = "phx_reply";
pub(crate) const PHX_ERROR: &str = "phx_error";
pub(crate) const PHX_CLOSE: &str = "phx_close";
pub(crate) const HEARTBEAT: &str = "heartbeat";
pub(crate) const POSTGRES_CHANGES: &str = "postgres_changes";
pub(crate) const SYSTEM: &str = "system";

/// One channel message in either direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_ref: Option<String>,
}

impl Frame {
    pub fn new(topic: impl Into<String>, event: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            event: event.into(),
            payload,
            reference: None,
            join_ref: None,
        }
    }

    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_join_ref(mut self, join_ref: Option<String>) -> Self {
        self.join_ref = join_ref;
        self
    }

    pub fn encode(&self) -> DashboardResult<String> {
        serde_json::to_string(self).map_err(DashboardError::from)
    }

    pub fn decode(text: &str) -> DashboardResult<Self> {
        serde_json::from_str(text).map_err(DashboardError::from)
    }

    /// `payload.status` as sent in replies and system messages
    pub fn payload_status(&self) -> Option<&str> {
        self.payload.get("status").and_then(Value::as_str)
    }
}

#[derive(Deserialize)]
struct ChangeData {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    table: Option<String>,
    #[serde(default)]
    record: Option<Value>,
    #[serde(default)]
    old_record: Option<Value>,
}

/// Decode a `postgres_changes` payload into a change event.
/// Rows from tables other than `table` yield `None`.
pub fn decode_change(payload: &Value, table: &str) -> DashboardResult<Option<ChangeEvent>> {
    let data = payload
        .get("data")
        .ok_or_else(|| DashboardError::Protocol("postgres_changes payload without data".into()))?;
    let data = ChangeData::deserialize(data)?;

    if data.table.as_deref().is_some_and(|t| t != table) {
        return Ok(None);
    }

    let event = match data.kind.as_str() {
        "INSERT" => ChangeEvent::Insert(Lead::from_row(require(data.record, "record")?)?),
        "UPDATE" => ChangeEvent::Update(Lead::from_row(require(data.record, "record")?)?),
        "DELETE" => {
            let old = require(data.old_record, "old_record")?;
            let id = match old.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(Value::Number(id)) => id.to_string(),
                _ => return Err(DashboardError::Protocol("DELETE without old_record.id".into())),
            };
            ChangeEvent::Delete(id)
        }
        other => return Err(DashboardError::Protocol(format!("unknown change type {other:?}"))),
    };
    Ok(Some(event))
}

fn require(value: Option<Value>, field: &str) -> DashboardResult<Value> {
    match value {
        Some(Value::Null) | None => Err(DashboardError::Protocol(format!("change without {field}"))),
        Some(value) => Ok(value),
    }
}
