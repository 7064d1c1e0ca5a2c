//! Frontend Models
//!
//! Domain types shared with `leads-core`, re-exported under one path for
//! the components.

pub use leads_core::domain::{ConnectivityStatus, Lead, StatusFilter};
pub use leads_core::feed::FeedSignal;
pub use leads_core::reconciler::{LeadReconciler, SnapshotToken};
pub use leads_core::repository::SnapshotLoad;
