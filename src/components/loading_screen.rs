use leptos::prelude::*;

/// Shown until the first snapshot lands
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="spinner"></div>
            <p>"Carregando leads..."</p>
        </div>
    }
}
