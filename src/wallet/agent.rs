use async_trait::async_trait;
use js_sys::Reflect;
use serde::Serialize;
use todo_gateway::{AccountAddress, EntryFunctionTransaction, PendingTransaction, WalletAgent, WalletError, WalletInfo};
use wasm_bindgen::prelude::*;

use super::{provider, read_string, InjectedProvider};

/// Error code wallets use when the user dismisses a prompt
const USER_REJECTED_CODE: f64 = 4001.0;

/// [`WalletAgent`] backed by a provider injected into the page
#[derive(Debug, Clone, Copy)]
pub struct BrowserWallet {
    info: &'static WalletInfo,
}

impl BrowserWallet {
    pub fn new(info: &'static WalletInfo) -> Self {
        Self { info }
    }

    fn provider(&self) -> Result<InjectedProvider, WalletError> {
        provider(self.info.detection_key)
            .ok_or_else(|| WalletError::Provider(format!("{} is not installed", self.info.name)))
    }

    /// Run `callback` when the wallet drops the connection on its own.
    pub fn watch_disconnect(&self, callback: impl FnMut() + 'static) {
        let Ok(provider) = self.provider() else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(callback);
        match provider.on_disconnect(&closure) {
            // The provider keeps the listener for the page lifetime
            Ok(()) => closure.forget(),
            Err(error) => log::debug!("{} has no disconnect events: {:?}", self.info.name, error),
        }
    }
}

#[async_trait(?Send)]
impl WalletAgent for BrowserWallet {
    fn name(&self) -> &str {
        self.info.name
    }

    async fn connect(&self) -> Result<AccountAddress, WalletError> {
        let response = self.provider()?.connect().await.map_err(wallet_error)?;
        let address = read_string(&response, "address")
            .ok_or_else(|| WalletError::Provider(format!("{} did not return an account address", self.info.name)))?;
        AccountAddress::parse(&address).map_err(|e| WalletError::Provider(e.to_string()))
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.provider()?.disconnect().await.map_err(wallet_error)?;
        Ok(())
    }

    async fn sign_and_submit(&self, transaction: &EntryFunctionTransaction) -> Result<PendingTransaction, WalletError> {
        let payload = transaction
            .to_entry_function_payload()
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| WalletError::Provider(e.to_string()))?;

        let response = self
            .provider()?
            .sign_and_submit_transaction(payload)
            .await
            .map_err(wallet_error)?;

        let hash = read_string(&response, "hash")
            .ok_or_else(|| WalletError::Provider("wallet response did not include a transaction hash".into()))?;
        Ok(PendingTransaction { hash })
    }
}

fn wallet_error(value: JsValue) -> WalletError {
    let code = Reflect::get(&value, &JsValue::from_str("code")).ok().and_then(|c| c.as_f64());
    if code == Some(USER_REJECTED_CODE) {
        return WalletError::UserRejected;
    }

    let message = Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    WalletError::Provider(message)
}
