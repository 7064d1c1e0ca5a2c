//! Dashboard Header Component
//!
//! Title bar with the change feed badge and the manual refresh button.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::ConnectivityStatus;

#[component]
pub fn DashboardHeader(connectivity: Memo<ConnectivityStatus>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let badge_class = move || {
        if connectivity.get().is_connected() {
            "feed-badge live"
        } else {
            "feed-badge"
        }
    };

    view! {
        <header class="dashboard-header">
            <div class="container header-row">
                <div class="header-brand">
                    <span class="brand-icon">"🏠"</span>
                    <div>
                        <h1>"CRM Corretor"</h1>
                        <p class="header-subtitle">"Gestão Inteligente de Leads Imobiliários"</p>
                    </div>
                </div>

                <div class="header-actions">
                    <span class=badge_class title=move || format!("{:?}", connectivity.get())>
                        <span class="feed-dot"></span>
                        {move || connectivity.get().label()}
                    </span>
                    <button
                        class="refresh-btn"
                        title="Atualizar"
                        on:click=move |_| ctx.refresh()
                    >
                        "🔄 Atualizar"
                    </button>
                </div>
            </div>
        </header>
    }
}
