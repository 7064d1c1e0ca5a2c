//! Change Events
//!
//! Row-level notifications from the change feed and the feed's
//! connectivity status.

use super::lead::Lead;

/// One row-level change, delivered in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    Insert(Lead),
    Update(Lead),
    /// Only the primary key survives a delete
    Delete(String),
}

impl ChangeEvent {
    /// Id of the record the event refers to
    pub fn lead_id(&self) -> &str {
        match self {
            ChangeEvent::Insert(lead) | ChangeEvent::Update(lead) => &lead.id,
            ChangeEvent::Delete(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChangeEvent::Insert(_) => "INSERT",
            ChangeEvent::Update(_) => "UPDATE",
            ChangeEvent::Delete(_) => "DELETE",
        }
    }
}

/// Channel state as reported by the change feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityStatus {
    /// Socket opening or join pending
    #[default]
    Connecting,
    /// Join acknowledged; changes are flowing
    Subscribed,
    /// A heartbeat went unanswered
    TimedOut,
    Closed,
    ChannelError,
}

impl ConnectivityStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityStatus::Subscribed)
    }

    /// The channel is gone and will not come back on its own
    pub fn is_dropped(&self) -> bool {
        matches!(
            self,
            ConnectivityStatus::TimedOut | ConnectivityStatus::Closed | ConnectivityStatus::ChannelError
        )
    }

    /// Badge text in the header
    pub fn label(&self) -> &'static str {
        if self.is_connected() {
            "Realtime Ativo"
        } else {
            "Desconectado"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_flags() {
        assert!(ConnectivityStatus::Subscribed.is_connected());
        assert!(!ConnectivityStatus::Connecting.is_connected());
        assert!(!ConnectivityStatus::Connecting.is_dropped());
        assert!(ConnectivityStatus::TimedOut.is_dropped());
        assert_eq!(ConnectivityStatus::Closed.label(), "Desconectado");
        assert_eq!(ConnectivityStatus::Subscribed.label(), "Realtime Ativo");
    }

    #[test]
    fn test_event_accessors() {
        let delete = ChangeEvent::Delete("x".into());
        assert_eq!(delete.lead_id(), "x");
        assert_eq!(delete.kind(), "DELETE");
    }
}
