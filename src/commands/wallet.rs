//! Wallet Commands
//!
//! Owns the page's wallet session and the gateway built from it. Both are
//! `!Send`, so they live in thread-locals and never enter a signal.

use std::cell::RefCell;
use std::rc::Rc;

use todo_gateway::{
    wallet_info, AptosRestClient, ConfigError, GatewayConfig, GatewayError, LedgerClient, Session, TodoGateway,
    WalletInfo, CONTRACT_ADDRESS_KEY, KNOWN_WALLETS, NETWORK_KEY, NODE_URL_KEY,
};

use crate::models::ConnectedAccount;
use crate::wallet::{detect, BrowserWallet, BrowserWallets};

thread_local! {
    static SESSION: Rc<Session<BrowserWallets>> = Rc::new(Session::new(BrowserWallets));
    /// Gateway cached against the session generation it was built for
    static GATEWAY: RefCell<Option<(u64, Rc<TodoGateway>)>> = const { RefCell::new(None) };
}

fn session() -> Rc<Session<BrowserWallets>> {
    SESSION.with(Rc::clone)
}

/// Settings baked in at build time
pub fn gateway_config() -> Result<GatewayConfig, ConfigError> {
    GatewayConfig::from_lookup(|key| {
        match key {
            NETWORK_KEY => option_env!("APTOS_NETWORK"),
            CONTRACT_ADDRESS_KEY => option_env!("CONTRACT_ADDRESS"),
            NODE_URL_KEY => option_env!("APTOS_NODE_URL"),
            _ => None,
        }
        .map(str::to_string)
    })
}

/// Gateway for the current session, rebuilt whenever the session changes.
pub(crate) fn gateway() -> Result<Rc<TodoGateway>, GatewayError> {
    let session = session();
    let generation = session.generation();

    if let Some(cached) = GATEWAY.with(|cell| {
        cell.borrow()
            .as_ref()
            .filter(|(built_for, _)| *built_for == generation)
            .map(|(_, gateway)| Rc::clone(gateway))
    }) {
        return Ok(cached);
    }

    let config = gateway_config()?;
    let ledger: Rc<dyn LedgerClient> = Rc::new(AptosRestClient::from_config(&config));
    let gateway = Rc::new(session.gateway(&config, ledger));
    log::debug!("Built gateway for session generation {}", generation);
    GATEWAY.with(|cell| *cell.borrow_mut() = Some((generation, Rc::clone(&gateway))));
    Ok(gateway)
}

// ========================
// Commands
// ========================

/// Names of wallets that have injected a provider into the page
pub fn available_wallets() -> Vec<String> {
    session().available_wallets()
}

/// Every known wallet with whether it is currently installed
pub fn detect_wallets() -> Vec<(WalletInfo, bool)> {
    KNOWN_WALLETS
        .iter()
        .map(|wallet| (*wallet, detect(wallet.detection_key)))
        .collect()
}

/// Connect the named wallet. `on_lost` runs if the wallet later drops this session.
pub async fn connect_wallet(name: &str, on_lost: impl Fn() + 'static) -> Result<ConnectedAccount, String> {
    let session = session();
    let identity = session.connect(name).await.map_err(|e| e.to_string())?;

    if let Some(info) = wallet_info(identity.wallet()) {
        let generation = session.generation();
        BrowserWallet::new(info).watch_disconnect(move || {
            let session = self::session();
            // Ignore events from a session that has since been replaced
            if session.generation() == generation {
                session.handle_connection_lost();
                on_lost();
            }
        });
    }

    Ok(ConnectedAccount::from(&identity))
}

pub async fn disconnect_wallet() -> Result<(), String> {
    session().disconnect().await.map_err(|e| e.to_string())
}
