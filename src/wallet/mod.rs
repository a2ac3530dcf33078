//! Browser Wallet Bindings
//!
//! Wallet extensions inject a provider object into `window`. This module
//! binds that object and probes for it; `agent` and `registry` adapt it to
//! the gateway's session traits.

mod agent;
mod registry;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub use agent::BrowserWallet;
pub use registry::BrowserWallets;

#[wasm_bindgen]
extern "C" {
    /// Provider object injected by a wallet extension
    #[derive(Clone, Debug)]
    pub type InjectedProvider;

    #[wasm_bindgen(method, catch)]
    async fn connect(this: &InjectedProvider) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    async fn disconnect(this: &InjectedProvider) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = signAndSubmitTransaction)]
    async fn sign_and_submit_transaction(this: &InjectedProvider, payload: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = onDisconnect)]
    fn on_disconnect(this: &InjectedProvider, callback: &Closure<dyn FnMut()>) -> Result<(), JsValue>;
}

/// A non-null property of `window`
fn global(key: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Whether the wallet with `detection_key` has injected its provider
pub fn detect(detection_key: &str) -> bool {
    match detection_key {
        "petra" => global("aptos").is_some() && global("petra").is_some(),
        "martian" => global("martian").is_some(),
        "pontem" => global("pontem").is_some(),
        _ => false,
    }
}

fn provider(detection_key: &str) -> Option<InjectedProvider> {
    let value = match detection_key {
        "petra" => global("petra").or_else(|| global("aptos")),
        other => global(other),
    }?;
    Some(value.unchecked_into())
}

/// Read a string field, also looking inside an `args` envelope.
fn read_string(value: &JsValue, field: &str) -> Option<String> {
    let key = JsValue::from_str(field);
    Reflect::get(value, &key)
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| {
            Reflect::get(value, &JsValue::from_str("args"))
                .ok()
                .and_then(|args| Reflect::get(&args, &key).ok())
                .and_then(|v| v.as_string())
        })
}
