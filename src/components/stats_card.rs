//! Stats Card Component

use leptos::prelude::*;

use leads_core::format::format_count;

/// One summary tile. `variant` selects the accent colour
/// (`default`, `primary`, `warning`, `success`).
#[component]
pub fn StatsCard(
    title: &'static str,
    #[prop(into)] value: Signal<usize>,
    description: &'static str,
    icon: &'static str,
    #[prop(default = "default")] variant: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("stats-card {variant}")>
            <div class="stats-card-body">
                <p class="stats-title">{title}</p>
                <p class="stats-value">{move || format_count(value.get())}</p>
                <p class="stats-description">{description}</p>
            </div>
            <span class="stats-icon">{icon}</span>
        </div>
    }
}
