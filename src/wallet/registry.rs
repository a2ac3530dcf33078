use std::rc::Rc;

use todo_gateway::{wallet_info, WalletAgent, WalletRegistry, KNOWN_WALLETS};

use super::{detect, BrowserWallet};

/// Registry over the wallets this page knows how to talk to
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserWallets;

impl WalletRegistry for BrowserWallets {
    fn list_available(&self) -> Vec<String> {
        KNOWN_WALLETS
            .iter()
            .filter(|wallet| detect(wallet.detection_key))
            .map(|wallet| wallet.name.to_string())
            .collect()
    }

    fn is_ready(&self, name: &str) -> bool {
        wallet_info(name).is_some_and(|wallet| detect(wallet.detection_key))
    }

    fn agent(&self, name: &str) -> Option<Rc<dyn WalletAgent>> {
        wallet_info(name).map(|info| Rc::new(BrowserWallet::new(info)) as Rc<dyn WalletAgent>)
    }
}
