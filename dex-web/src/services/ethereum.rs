//! Injected-wallet bridge.
//!
//! `window.ethereum` is reached through a small inline JS shim; everything
//! above it speaks [`Eip1193`] so the contract layer never sees `JsValue`.

use alloy_primitives::Address;
use async_trait::async_trait;
use lib_evm::client::parse_quantity;
use lib_evm::{Eip1193, EvmClient, EvmError};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::config::app_config;

#[wasm_bindgen(inline_js = "
export function hasEthereum() {
    return typeof window !== 'undefined' && !!window.ethereum;
}

export async function ethereumRequest(method, params) {
    if (!window.ethereum) {
        throw { code: -1, message: 'No Ethereum wallet detected' };
    }
    return await window.ethereum.request({ method, params });
}

export function onEthereumEvent(event, callback) {
    if (window.ethereum && window.ethereum.on) {
        window.ethereum.on(event, callback);
    }
}
")]
extern "C" {
    #[wasm_bindgen(js_name = hasEthereum)]
    fn has_ethereum() -> bool;

    #[wasm_bindgen(catch, js_name = ethereumRequest)]
    async fn ethereum_request(method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = onEthereumEvent)]
    fn on_ethereum_event(event: &str, callback: &Closure<dyn FnMut(JsValue)>);
}

/// `window.ethereum` as an [`Eip1193`] provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct InjectedProvider;

#[async_trait(?Send)]
impl Eip1193 for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> lib_evm::Result<Value> {
        if !has_ethereum() {
            return Err(EvmError::NoWallet);
        }

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let js_params = params
            .serialize(&serializer)
            .map_err(|e| EvmError::malformed(method, e))?;

        log::debug!("-> {}", method);
        let result = ethereum_request(method, js_params)
            .await
            .map_err(rpc_error)?;

        if result.is_null() || result.is_undefined() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result).map_err(|e| EvmError::malformed(method, e))
    }

    async fn sleep(&self, millis: u32) {
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}

/// Pull `{ code, message }` out of a rejected provider promise.
fn rpc_error(err: JsValue) -> EvmError {
    let code = js_sys::Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|c| c as i64)
        .unwrap_or(-1);
    let message = js_sys::Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    EvmError::from_rpc(code, message)
}

pub fn wallet_available() -> bool {
    has_ethereum()
}

/// Contract client over the injected wallet, with receipt polling taken
/// from the build configuration.
pub fn client() -> EvmClient<InjectedProvider> {
    let config = app_config();
    EvmClient::new(InjectedProvider).with_receipt_polling(config.receipt_poll_ms, config.receipt_max_polls)
}

/// Subscribe to `accountsChanged`. The listener lives for the page lifetime.
pub fn on_accounts_changed(handler: impl Fn(Vec<Address>) + 'static) {
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        let accounts: Vec<Address> = match serde_wasm_bindgen::from_value(value) {
            Ok(accounts) => accounts,
            Err(e) => {
                log::warn!("Unreadable accountsChanged payload: {}", e);
                Vec::new()
            }
        };
        handler(accounts);
    });
    on_ethereum_event("accountsChanged", &closure);
    closure.forget();
}

/// Subscribe to `chainChanged`. Payloads that are not a hex quantity are
/// dropped with a warning.
pub fn on_chain_changed(handler: impl Fn(u64) + 'static) {
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        match value.as_string().as_deref().and_then(parse_quantity) {
            Some(chain_id) => handler(chain_id),
            None => log::warn!("Unreadable chainChanged payload: {:?}", value),
        }
    });
    on_ethereum_event("chainChanged", &closure);
    closure.forget();
}
