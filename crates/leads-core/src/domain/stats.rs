//! Lead Stats
//!
//! Aggregate counters shown in the stat tiles.

use super::lead::Lead;
use super::status::LeadStatus;

/// Derived counts over a lead set; never stored independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeadStats {
    pub total: usize,
    /// Leads with status `novo`
    pub new_leads: usize,
    /// Leads with status `aguardando_resposta`
    pub awaiting: usize,
    pub responded: usize,
}

impl LeadStats {
    /// Fold over `(status, responded)` pairs
    pub fn tally<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (LeadStatus, bool)>,
    {
        rows.into_iter().fold(Self::default(), |mut stats, (status, responded)| {
            stats.total += 1;
            match status {
                LeadStatus::New => stats.new_leads += 1,
                LeadStatus::AwaitingReply => stats.awaiting += 1,
                _ => {}
            }
            if responded {
                stats.responded += 1;
            }
            stats
        })
    }

    pub fn from_leads<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Self {
        Self::tally(leads.into_iter().map(|lead| (lead.status, lead.responded)))
    }
}
