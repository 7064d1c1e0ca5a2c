//! Repository Layer - Core Trait
//!
//! Read-only access to the lead collection. Implementations absorb their own
//! failures: callers always get data, possibly empty.

use async_trait::async_trait;

use crate::domain::{Lead, LeadStats};

/// Single-shot reads against the backend `leads` collection
///
/// Futures are not `Send`: in the browser they run on the UI thread.
#[async_trait(?Send)]
pub trait LeadRepository {
    /// All leads, newest first; empty on any backend error
    async fn fetch_all(&self) -> Vec<Lead>;

    /// Server-side aggregate counts; zeroed on any backend error
    async fn fetch_stats(&self) -> LeadStats;
}
