//! Footer Component

use leptos::prelude::*;

use crate::commands;

#[component]
pub fn Footer() -> impl IntoView {
    let network = commands::gateway_config()
        .map(|config| config.network().to_string())
        .unwrap_or_else(|_| "unconfigured".to_string());

    view! {
        <footer class="app-footer">
            <span class="muted">{format!("To-dos stored on Aptos {}", network)}</span>
        </footer>
    }
}
