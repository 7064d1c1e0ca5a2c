//! Live List Reconciler
//!
//! Owns the ordered lead list (most recent first) and its derived stats, and
//! merges two unordered sources into it: full snapshots from the repository
//! and row changes from the feed.
//!
//! While a snapshot request is in flight every applied change is also kept in
//! a journal. When the snapshot lands it replaces the list and the journal is
//! replayed over it, so a change that raced ahead of the snapshot is not lost.
//! Upserts never overwrite a row with a strictly newer `updated_at`, which makes
//! both arrival orders converge on the same list.

use std::collections::HashSet;

use crate::domain::{ChangeEvent, Lead, LeadStats, StatusFilter};

/// Identifies one snapshot request; only the latest one may land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotToken(u64);

#[derive(Debug, Clone, Default)]
pub struct LeadReconciler {
    leads: Vec<Lead>,
    stats: LeadStats,
    generation: u64,
    /// `Some` while a snapshot request is in flight
    journal: Option<Vec<ChangeEvent>>,
}

impl LeadReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    pub fn stats(&self) -> LeadStats {
        self.stats
    }

    /// Whether a snapshot request is still outstanding
    pub fn snapshot_pending(&self) -> bool {
        self.journal.is_some()
    }

    // ========================
    // Snapshots
    // ========================

    /// Mark a snapshot request as in flight and start journaling changes.
    /// A newer request supersedes any older one still outstanding.
    pub fn begin_snapshot(&mut self) -> SnapshotToken {
        self.generation += 1;
        if self.journal.is_none() {
            self.journal = Some(Vec::new());
        }
        SnapshotToken(self.generation)
    }

    /// Land the snapshot for `token`. Returns `false` and leaves the list
    /// untouched when a newer request has been issued since.
    pub fn complete_snapshot(&mut self, token: SnapshotToken, leads: Vec<Lead>) -> bool {
        if token.0 != self.generation {
            log::debug!(
                "[RECONCILER] Dropping stale snapshot #{} (latest #{})",
                token.0,
                self.generation
            );
            return false;
        }
        self.load_snapshot(leads);
        true
    }

    /// Replace the whole collection, then replay journaled changes over it
    pub fn load_snapshot(&mut self, leads: Vec<Lead>) {
        let mut seen = HashSet::with_capacity(leads.len());
        self.leads = leads
            .into_iter()
            .filter(|lead| seen.insert(lead.id.clone()))
            .collect();

        let journal = self.journal.take().unwrap_or_default();
        let replayed = journal.len();
        for event in journal {
            self.merge(event);
        }

        self.recompute_stats();
        log::info!(
            "[RECONCILER] Snapshot loaded: {} leads ({} journaled changes replayed)",
            self.leads.len(),
            replayed
        );
    }

    // ========================
    // Change events
    // ========================

    pub fn apply(&mut self, event: ChangeEvent) {
        log::debug!("[RECONCILER] {} {}", event.kind(), event.lead_id());
        if let Some(journal) = self.journal.as_mut() {
            journal.push(event.clone());
        }
        self.merge(event);
        self.recompute_stats();
    }

    /// Prepend a new lead; a duplicate delivery behaves as an update
    pub fn apply_insert(&mut self, lead: Lead) {
        self.apply(ChangeEvent::Insert(lead));
    }

    /// Replace a lead in place; an unknown id behaves as an insert
    pub fn apply_update(&mut self, lead: Lead) {
        self.apply(ChangeEvent::Update(lead));
    }

    /// Remove a lead; unknown ids are ignored
    pub fn apply_delete(&mut self, id: &str) {
        self.apply(ChangeEvent::Delete(id.to_string()));
    }

    fn merge(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::Insert(lead) | ChangeEvent::Update(lead) => self.upsert(lead),
            ChangeEvent::Delete(id) => self.leads.retain(|lead| lead.id != id),
        }
    }

    fn upsert(&mut self, lead: Lead) {
        match self.leads.iter_mut().find(|existing| existing.id == lead.id) {
            Some(existing) if existing.updated_at > lead.updated_at => {}
            Some(existing) => *existing = lead,
            None => self.leads.insert(0, lead),
        }
    }

    // ========================
    // Derived views
    // ========================

    /// Recount stats from the current list
    pub fn recompute_stats(&mut self) -> LeadStats {
        self.stats = LeadStats::from_leads(&self.leads);
        self.stats
    }

    /// Leads matching `filter`, most recent first
    pub fn filtered_view(&self, filter: StatusFilter) -> impl Iterator<Item = &Lead> + '_ {
        self.leads.iter().filter(move |lead| filter.matches(lead.status))
    }
}
