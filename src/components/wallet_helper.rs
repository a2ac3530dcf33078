//! Wallet Helper Component
//!
//! Shown while disconnected. Reports which wallets are installed and links
//! to installs when none are.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_gateway::PETRA_INSTALL_URL;

use crate::commands;

/// Extensions may inject their provider after the page loads
const REPROBE_DELAY_MS: u32 = 2_000;

#[component]
pub fn WalletHelper() -> impl IntoView {
    let (wallets, set_wallets) = signal(commands::detect_wallets());

    spawn_local(async move {
        TimeoutFuture::new(REPROBE_DELAY_MS).await;
        // The helper may be gone once the account connects
        let _ = set_wallets.try_set(commands::detect_wallets());
    });

    let any_detected = move || wallets.with(|list| list.iter().any(|(_, detected)| *detected));

    view! {
        <Show
            when=any_detected
            fallback=move || view! {
                <section class="wallet-helper">
                    <div class="alert warning">
                        <strong>"No Aptos Wallet Detected"</strong>
                        <p>"You need to install an Aptos wallet to use this dApp."</p>
                    </div>

                    <div class="recommended-wallet">
                        <h4>"⭐ RECOMMENDED: Install Petra Wallet"</h4>
                        <p><strong>"Official wallet by Aptos Labs"</strong></p>
                        <a class="install-btn primary" href=PETRA_INSTALL_URL target="_blank" rel="noopener noreferrer">
                            "📦 INSTALL PETRA WALLET"
                        </a>
                    </div>

                    <h5>"Alternative Wallets:"</h5>
                    <ul class="wallet-list">
                        {move || wallets.get().into_iter()
                            .filter(|(wallet, _)| wallet.detection_key != "petra")
                            .map(|(wallet, detected)| view! {
                                <li class=if detected { "wallet-entry detected" } else { "wallet-entry" }>
                                    <strong>{wallet.name}</strong>
                                    {if detected {
                                        view! { <span class="installed">"✓ Installed"</span> }.into_any()
                                    } else {
                                        view! {
                                            <a class="install-btn" href=wallet.install_url target="_blank" rel="noopener noreferrer">
                                                "Install"
                                            </a>
                                        }.into_any()
                                    }}
                                </li>
                            })
                            .collect_view()}
                    </ul>

                    <p class="muted">
                        <strong>"After installing Petra Wallet:"</strong>
                        <br/>"1. Refresh this page or restart your browser"
                        <br/>"2. Set your wallet to the network this app uses"
                        <br/>"3. Click \"Connect Wallet\" in the header to get started"
                        <br/>"4. Create or import your wallet account"
                    </p>
                </section>
            }
        >
            <div class="alert success">
                <strong>"Wallets Detected"</strong>
                <p>"Aptos wallets found! Click the 'Connect Wallet' button in the header to get started."</p>
            </div>
        </Show>
    }
}
