//! Lead Loading
//!
//! Snapshot reloads and change feed attachment, writing into the app store.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leads_core::{load_snapshot, pump, DashboardConfig, RestLeadRepository};

use super::realtime::{subscribe, Subscription};
use crate::models::ConnectivityStatus;
use crate::store::{store_apply_signal, store_begin_snapshot, store_complete_snapshot, AppStore, AppStateStoreFields};

/// Re-run the snapshot load. Feed changes arriving meanwhile are journaled
/// and replayed over the result.
pub fn reload_leads(store: AppStore, repository: StoredValue<RestLeadRepository, LocalStorage>) {
    let token = store_begin_snapshot(&store);
    let repository = repository.get_value();
    spawn_local(async move {
        let load = load_snapshot(&repository).await;
        log::info!("[APP] Loaded {} leads", load.leads.len());
        store_complete_snapshot(&store, token, load);
    });
}

/// Replace the feed subscription in `slot` with a fresh one. The old
/// subscription is cancelled first so changes are never delivered twice.
pub fn attach_feed(store: AppStore, config: &DashboardConfig, slot: StoredValue<Subscription, LocalStorage>) {
    slot.update_value(Subscription::cancel);
    *store.connectivity().write() = ConnectivityStatus::Connecting;

    match subscribe(config) {
        Ok((subscription, signals)) => {
            slot.set_value(subscription);
            spawn_local(async move {
                pump(signals, move |signal| store_apply_signal(&store, signal)).await;
            });
        }
        Err(e) => {
            log::error!("[APP] Change feed unavailable: {e}");
            *store.connectivity().write() = ConnectivityStatus::ChannelError;
        }
    }
}
