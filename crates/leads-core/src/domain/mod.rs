//! Domain Layer
//!
//! Lead entity, status vocabulary, aggregate stats and change events.
//! Wire names follow the backend's `leads` table columns.

mod change;
mod lead;
mod stats;
mod status;

pub use change::{ChangeEvent, ConnectivityStatus};
pub use lead::Lead;
pub use stats::LeadStats;
pub use status::{LeadStatus, StatusFilter, UnknownStatus};
