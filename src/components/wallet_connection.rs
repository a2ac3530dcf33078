//! Wallet Connection Component
//!
//! Header control: a connect button with a wallet picker when disconnected,
//! the account label and a disconnect button when connected.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_gateway::KNOWN_WALLETS;

use crate::commands;
use crate::context::use_app_context;

#[component]
pub fn WalletConnection() -> impl IntoView {
    let ctx = use_app_context();

    let (modal_open, set_modal_open) = signal(false);
    let (connecting, set_connecting) = signal(false);
    let (available, set_available) = signal(Vec::<String>::new());

    let open_modal = move |_: web_sys::MouseEvent| {
        set_available.set(commands::available_wallets());
        set_modal_open.set(true);
    };

    let connect = move |name: String| {
        set_connecting.set(true);
        spawn_local(async move {
            let on_lost = move || {
                ctx.set_account(None);
                ctx.notices.warning("Wallet Disconnected", "The wallet ended the session.");
            };
            match commands::connect_wallet(&name, on_lost).await {
                Ok(account) => {
                    log::info!("Connected {}", account.label());
                    ctx.set_account(Some(account));
                    set_modal_open.set(false);
                }
                Err(message) => ctx.notices.error("Connection Failed", message),
            }
            set_connecting.set(false);
        });
    };

    let disconnect = move |_: web_sys::MouseEvent| {
        spawn_local(async move {
            // The session is torn down even when the wallet reports an error
            if let Err(message) = commands::disconnect_wallet().await {
                log::error!("{}", message);
            }
            ctx.set_account(None);
        });
    };

    view! {
        <div class="wallet-connection">
            {move || match ctx.account.get() {
                Some(account) => view! {
                    <span class="wallet-badge" title=account.address.clone()>{account.label()}</span>
                    <button class="disconnect-btn" on:click=disconnect>"Disconnect"</button>
                }.into_any(),
                None => view! {
                    <button class="connect-btn" on:click=open_modal>"Connect Wallet"</button>
                }.into_any(),
            }}

            <Show when=move || modal_open.get()>
                <div class="modal-backdrop" on:click=move |_| set_modal_open.set(false)>
                    <div class="modal" on:click=|ev| ev.stop_propagation()>
                        <h3>"Connect Wallet"</h3>
                        {move || {
                            let wallets = available.get();
                            if wallets.is_empty() {
                                view! {
                                    <p class="muted">"No Aptos wallet detected. Install one of these:"</p>
                                    <ul class="install-links">
                                        {KNOWN_WALLETS.iter().map(|wallet| view! {
                                            <li>
                                                <a href=wallet.install_url target="_blank" rel="noopener noreferrer">
                                                    {format!("Install {}", wallet.name)}
                                                </a>
                                            </li>
                                        }).collect_view()}
                                    </ul>
                                }.into_any()
                            } else {
                                view! {
                                    <p><strong>"Choose a wallet:"</strong></p>
                                    <div class="wallet-options">
                                        {wallets.into_iter().map(|name| {
                                            let label = name.clone();
                                            view! {
                                                <button
                                                    class="wallet-option"
                                                    disabled=move || connecting.get()
                                                    on:click=move |_| connect(name.clone())
                                                >
                                                    {label}
                                                </button>
                                            }
                                        }).collect_view()}
                                    </div>
                                }.into_any()
                            }
                        }}
                        <button class="cancel-btn" on:click=move |_| set_modal_open.set(false)>"Cancel"</button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
