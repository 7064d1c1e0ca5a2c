//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{ConnectivityStatus, FeedSignal, LeadReconciler, SnapshotLoad, SnapshotToken, StatusFilter};

/// Global dashboard state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Lead list and derived stats
    pub reconciler: LeadReconciler,
    /// Change feed channel status
    pub connectivity: ConnectivityStatus,
    /// Status selected in the filter
    pub status_filter: StatusFilter,
    /// True until the first snapshot lands
    pub loading: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Start journaling feed changes for an upcoming snapshot
pub fn store_begin_snapshot(store: &AppStore) -> SnapshotToken {
    store.reconciler().write().begin_snapshot()
}

/// Land a snapshot load unless a newer refresh superseded it
pub fn store_complete_snapshot(store: &AppStore, token: SnapshotToken, load: SnapshotLoad) {
    if !load.is_consistent() {
        log::warn!(
            "[STORE] Server stats {:?} disagree with the fetched rows; using recomputed counts",
            load.stats
        );
    }
    let landed = store.reconciler().write().complete_snapshot(token, load.leads);
    if landed {
        *store.loading().write() = false;
    }
}

/// Apply one change feed signal
pub fn store_apply_signal(store: &AppStore, signal: FeedSignal) {
    match signal {
        FeedSignal::Change(event) => store.reconciler().write().apply(event),
        FeedSignal::Status(status) => *store.connectivity().write() = status,
    }
}
