//! Aptos Todo Frontend App
//!
//! Main application component: header with the view switcher and the wallet
//! control, then the todo workspace, the documentation, or both side by side.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{
    AddTodo, Documentation, Footer, NotificationStack, TodoList, WalletConnection, WalletHelper,
};
use crate::context::{use_app_context, AppContext, Notices};
use crate::models::{ConnectedAccount, ViewMode};
use crate::store::{store_set_loading, store_set_todos, AppState};

#[component]
pub fn App() -> impl IntoView {
    // State
    let (account, set_account) = signal::<Option<ConnectedAccount>>(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (busy, set_busy) = signal(false);
    let notices = Notices::new();
    let (view_mode, set_view_mode) = signal(ViewMode::default());

    let store = Store::new(AppState::new());
    provide_context(store);

    // Provide context to all children
    let ctx = AppContext::new((account, set_account), (reload_trigger, set_reload_trigger), (busy, set_busy), notices);
    provide_context(ctx);

    if let Err(error) = commands::gateway_config() {
        log::error!("{}", error);
        notices.error("Service Error", format!("Failed to initialize blockchain service: {}", error));
    }

    // Load todos when the account or trigger changes
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let Some(account) = account.get() else {
            store_set_todos(&store, Vec::new());
            return;
        };
        log::debug!("Loading todos for {}, trigger={}", account.address, trigger);
        store_set_loading(&store, true);
        spawn_local(async move {
            match commands::list_todos(&account.address).await {
                Ok(loaded) => {
                    log::debug!("Loaded {} todos", loaded.len());
                    store_set_todos(&store, loaded);
                }
                Err(message) => {
                    log::error!("{}", message);
                    notices.error("Loading Error", "Failed to load todos from blockchain");
                }
            }
            store_set_loading(&store, false);
        });
    });

    // Configuration diagnostics for each newly connected account
    Effect::new(move |_| {
        if let Some(account) = account.get() {
            spawn_local(async move {
                commands::verify_configuration(&account.address).await;
            });
        }
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"📝 Aptos To-do List"</h1>
                <nav class="view-switcher">
                    {ViewMode::ALL
                        .into_iter()
                        .map(|mode| {
                            view! {
                                <button
                                    class="view-tab"
                                    class:active=move || view_mode.get() == mode
                                    on:click=move |_| set_view_mode.set(mode)
                                >
                                    {mode.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                <WalletConnection />
            </header>

            <main class="main-content" class:split=move || view_mode.get() == ViewMode::Split>
                <Show when=move || view_mode.get().shows_app()>
                    <div class="view-panel">
                        <Show when=move || view_mode.get() == ViewMode::Split>
                            <h2 class="panel-title">"📝 To-do Application"</h2>
                        </Show>
                        <TodoWorkspace />
                    </div>
                </Show>
                <Show when=move || view_mode.get().shows_docs()>
                    <div class="view-panel">
                        <Documentation />
                    </div>
                </Show>
            </main>

            <Footer />
            <NotificationStack />
        </div>
    }
}

/// Add form and list once connected; the wallet helper and welcome card otherwise.
#[component]
fn TodoWorkspace() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Show
            when=move || ctx.is_connected()
            fallback=|| view! {
                <WalletHelper />
                <section class="welcome-card">
                    <h3>"Welcome to Aptos To-do List! 🚀"</h3>
                    <p>
                        "Connect your Aptos wallet to start managing your to-dos on the blockchain. "
                        "Your to-dos will be stored securely and immutably on the Aptos network."
                    </p>
                    <strong>"Features:"</strong>
                    <ul>
                        <li>"✅ Create, update, and delete to-dos"</li>
                        <li>"🔒 Secure blockchain storage"</li>
                        <li>"💰 Low transaction fees"</li>
                        <li>"🌐 Decentralized and censorship-resistant"</li>
                    </ul>
                </section>
            }
        >
            <AddTodo />
            <TodoList />
        </Show>
    }
}
