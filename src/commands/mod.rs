//! Backend Bindings
//!
//! Frontend bindings to the hosted backend: snapshot loads over REST and the
//! realtime change feed.

mod leads;
mod realtime;

pub use leads::{attach_feed, reload_leads};
pub use realtime::Subscription;
