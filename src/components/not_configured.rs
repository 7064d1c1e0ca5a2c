//! Not Configured Screen
//!
//! Blocking state when the backend endpoint or key is missing. No data
//! operation runs behind it.

use leptos::prelude::*;

use leads_core::ConfigError;

#[component]
pub fn NotConfigured(error: ConfigError) -> impl IntoView {
    let settings = match &error {
        ConfigError::Missing(names) => names.clone(),
        ConfigError::InvalidUrl(_) => vec!["SUPABASE_URL"],
    };
    let detail = error.to_string();

    view! {
        <div class="not-configured">
            <div class="not-configured-card">
                <span class="not-configured-icon">"⚠️"</span>
                <h1>"Backend não configurado"</h1>
                <p>"Defina as variáveis abaixo antes de compilar o dashboard:"</p>
                <ul class="setting-list">
                    {settings.into_iter().map(|name| view! { <li><code>{name}</code></li> }).collect_view()}
                </ul>
                <p class="not-configured-detail">{detail}</p>
            </div>
        </div>
    }
}
