//! Leads Filter Component
//!
//! Section heading, match count and the status selector.

use leptos::prelude::*;

use leads_core::format::found_label;

use crate::models::StatusFilter;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn LeadsFilter(#[prop(into)] total_count: Signal<usize>) -> impl IntoView {
    let store = use_app_store();

    let on_change = move |ev| {
        let value = event_target_value(&ev);
        match value.parse::<StatusFilter>() {
            Ok(filter) => *store.status_filter().write() = filter,
            Err(e) => log::warn!("[FILTER] {e}"),
        }
    };

    view! {
        <div class="leads-filter">
            <div class="filter-heading">
                <h2>"Seus Leads"</h2>
                <span class="filter-count">{move || found_label(total_count.get())}</span>
            </div>

            <label class="filter-select">
                <span>"Status"</span>
                <select
                    prop:value=move || store.status_filter().get().as_str()
                    on:change=on_change
                >
                    {StatusFilter::options().map(|option| {
                        view! {
                            <option value=option.as_str()>{option.label()}</option>
                        }
                    }).collect_view()}
                </select>
            </label>
        </div>
    }
}
