//! Change Feed Queue
//!
//! The feed binding pushes `FeedSignal`s into an mpsc queue; `pump` is the
//! one routine that drains it, so signals are applied strictly in arrival
//! order. Cancelling the subscription closes the sender and ends the pump.

use futures::{Stream, StreamExt};

use crate::domain::{ChangeEvent, ConnectivityStatus};

/// Everything the change feed can tell the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSignal {
    Change(ChangeEvent),
    Status(ConnectivityStatus),
}

/// Drain `signals` into `apply` until the sender side is closed.
/// Returns the number of signals handled.
pub async fn pump<S, F>(signals: S, mut apply: F) -> usize
where
    S: Stream<Item = FeedSignal>,
    F: FnMut(FeedSignal),
{
    futures::pin_mut!(signals);
    let mut handled = 0;
    while let Some(signal) = signals.next().await {
        apply(signal);
        handled += 1;
    }
    log::info!("[FEED] Signal queue closed after {handled} signals");
    handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LeadStatus;
    use crate::reconciler::LeadReconciler;
    use chrono::Utc;
    use futures::channel::mpsc;
    use futures::executor::block_on;

    fn lead(id: &str) -> crate::domain::Lead {
        crate::domain::Lead {
            id: id.to_string(),
            name: id.to_uppercase(),
            phone: String::new(),
            interest: String::new(),
            status: LeadStatus::New,
            source: String::new(),
            message_sent: false,
            responded: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_pump_applies_in_order_and_stops_on_close() {
        let (tx, rx) = mpsc::unbounded();
        tx.unbounded_send(FeedSignal::Status(ConnectivityStatus::Subscribed)).unwrap();
        tx.unbounded_send(FeedSignal::Change(ChangeEvent::Insert(lead("a")))).unwrap();
        tx.unbounded_send(FeedSignal::Change(ChangeEvent::Insert(lead("b")))).unwrap();
        tx.unbounded_send(FeedSignal::Change(ChangeEvent::Delete("a".into()))).unwrap();
        tx.close_channel();
        assert!(tx.unbounded_send(FeedSignal::Status(ConnectivityStatus::Closed)).is_err());

        let mut reconciler = LeadReconciler::new();
        let mut status = ConnectivityStatus::Connecting;
        let handled = block_on(pump(rx, |signal| match signal {
            FeedSignal::Change(event) => reconciler.apply(event),
            FeedSignal::Status(next) => status = next,
        }));

        assert_eq!(handled, 4);
        assert_eq!(status, ConnectivityStatus::Subscribed);
        let ids: Vec<&str> = reconciler.leads().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b"]);
    }

    #[test]
    fn test_pump_ends_when_sender_dropped() {
        let (tx, rx) = mpsc::unbounded::<FeedSignal>();
        drop(tx);
        assert_eq!(block_on(pump(rx, |_| {})), 0);
    }
}
