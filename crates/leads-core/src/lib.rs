//! Leads Core
//!
//! Target-independent half of the leads dashboard: the lead model, the live
//! list reconciler, the realtime channel codec and the REST repository client.
//! Everything here builds natively so it can be tested without a browser.

pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod format;
pub mod realtime;
pub mod reconciler;
pub mod repository;


pub use config::{ConfigError, DashboardConfig};
pub use domain::{ChangeEvent, ConnectivityStatus, Lead, LeadStats, LeadStatus, StatusFilter};
pub use error::{DashboardError, DashboardResult};
pub use feed::{pump, FeedSignal};
pub use reconciler::{LeadReconciler, SnapshotToken};
pub use repository::{load_snapshot, LeadRepository, RestLeadRepository, SnapshotLoad};
