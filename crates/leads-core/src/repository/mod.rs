//! Repository Layer
//!
//! Data access abstractions and the REST implementation.

mod rest;
mod traits;

pub use rest::{decode_rows, tally_rows, RestLeadRepository};
pub use traits::LeadRepository;

use crate::domain::{Lead, LeadStats};

/// Result of one dashboard load: the lead list plus the server's own counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotLoad {
    pub leads: Vec<Lead>,
    pub stats: LeadStats,
}

impl SnapshotLoad {
    /// Whether the server-side counts agree with a recount of `leads`
    pub fn is_consistent(&self) -> bool {
        LeadStats::from_leads(&self.leads) == self.stats
    }
}

/// Fetch the lead list and the aggregate counts concurrently
pub async fn load_snapshot<R>(repository: &R) -> SnapshotLoad
where
    R: LeadRepository + ?Sized,
{
    let (leads, stats) = futures::join!(repository.fetch_all(), repository.fetch_stats());
    SnapshotLoad { leads, stats }
}
