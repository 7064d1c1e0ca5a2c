//! Leads Dashboard App
//!
//! Composition root: validates configuration, builds the repository and the
//! change feed slot, and lays out header, stat tiles, filter and table.

use leptos::prelude::*;
use reactive_stores::Store;

use leads_core::{DashboardConfig, RestLeadRepository};

use crate::commands::{self, Subscription};
use crate::components::{DashboardHeader, LeadsFilter, LeadsTable, LoadingScreen, NotConfigured, StatsCard};
use crate::context::AppContext;
use crate::models::Lead;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    match DashboardConfig::from_build_env() {
        Ok(config) => view! { <Dashboard config=config /> }.into_any(),
        Err(err) => {
            log::warn!("[APP] Backend not configured: {err}");
            view! { <NotConfigured error=err /> }.into_any()
        }
    }
}

#[component]
fn Dashboard(config: DashboardConfig) -> impl IntoView {
    // State
    let store = Store::new(AppState::new());
    let (refresh_trigger, set_refresh_trigger) = signal(0u32);

    // Provide context to all children
    provide_context(store);
    provide_context(AppContext::new((refresh_trigger, set_refresh_trigger)));

    // One repository and one feed slot per mounted dashboard
    let repository = StoredValue::new_local(RestLeadRepository::new(config.clone()));
    let feed = StoredValue::new_local(Subscription::default());
    let config = StoredValue::new_local(config);

    on_cleanup(move || feed.update_value(Subscription::cancel));

    // Load on mount and on every refresh. The feed is attached on mount and
    // re-attached by a refresh only after it has dropped.
    Effect::new(move |_| {
        let trigger = refresh_trigger.get();
        log::info!("[APP] Loading leads, trigger={trigger}");
        commands::reload_leads(store, repository);

        let status = store.connectivity().get_untracked();
        if trigger == 0 || status.is_dropped() {
            config.with_value(|config| commands::attach_feed(store, config, feed));
        }
    });

    let connectivity = Memo::new(move |_| store.connectivity().get());
    let stats = Memo::new(move |_| store.reconciler().with(|r| r.stats()));
    let visible_leads = Memo::new(move |_| {
        let filter = store.status_filter().get();
        store
            .reconciler()
            .with(|r| r.filtered_view(filter).cloned().collect::<Vec<Lead>>())
    });

    view! {
        <Show
            when=move || !store.loading().get()
            fallback=|| view! { <LoadingScreen /> }
        >
            <div class="dashboard">
                <DashboardHeader connectivity=connectivity />

                <main class="container">
                    // Stats Grid
                    <section class="stats-grid">
                        <StatsCard
                            title="Total de Leads"
                            value=Signal::derive(move || stats.get().total)
                            description="Todos os leads cadastrados"
                            icon="👥"
                            variant="default"
                        />
                        <StatsCard
                            title="Novos"
                            value=Signal::derive(move || stats.get().new_leads)
                            description="Aguardando primeiro contato"
                            icon="📈"
                            variant="primary"
                        />
                        <StatsCard
                            title="Aguardando"
                            value=Signal::derive(move || stats.get().awaiting)
                            description="Pendente de resposta"
                            icon="⏳"
                            variant="warning"
                        />
                        <StatsCard
                            title="Responderam"
                            value=Signal::derive(move || stats.get().responded)
                            description="Leads engajados"
                            icon="✅"
                            variant="success"
                        />
                    </section>

                    // Filter & Table
                    <section class="leads-section">
                        <LeadsFilter total_count=Signal::derive(move || visible_leads.with(Vec::len)) />
                        <LeadsTable leads=visible_leads />
                    </section>
                </main>

                <footer class="dashboard-footer">
                    <div class="container footer-row">
                        <div class="footer-status">
                            <span class=move || {
                                if connectivity.get().is_connected() { "feed-pill live" } else { "feed-pill" }
                            }>
                                "📡 " {move || connectivity.get().label()}
                            </span>
                            <span>"•"</span>
                            <span>"Atualizações instantâneas"</span>
                        </div>
                        <p>"CRM Corretor • Gestão Inteligente de Leads"</p>
                    </div>
                </footer>
            </div>
        </Show>
    }
}
