//! Scripted EIP-1193 provider for integration tests.

#![allow(dead_code)]

use alloy_primitives::{hex, Address, B256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use lib_evm::{Eip1193, EvmClient, EvmError, Result};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

#[derive(Clone)]
enum Reply {
    Ok(Value),
    Err(i64, String),
}

/// Replies are keyed by method name, or `eth_call:<selector>` for contract
/// reads. Queued replies are consumed in order; the last one repeats.
#[derive(Default)]
pub struct MockProvider {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    requests: RefCell<Vec<(String, Value)>>,
    sleeps: Cell<u32>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, key: String, reply: Reply) -> &Self {
        self.replies.borrow_mut().entry(key).or_default().push_back(reply);
        self
    }

    pub fn on(&self, method: &str, value: Value) -> &Self {
        self.push(method.to_string(), Reply::Ok(value))
    }

    pub fn on_error(&self, method: &str, code: i64, message: &str) -> &Self {
        self.push(method.to_string(), Reply::Err(code, message.to_string()))
    }

    /// Reply to `eth_call`s of `C` with ABI-encoded return data.
    pub fn on_call<C: SolCall>(&self, encoded: Vec<u8>) -> &Self {
        self.push(call_key(&C::SELECTOR), Reply::Ok(hex_value(&encoded)))
    }

    pub fn on_call_error<C: SolCall>(&self, message: &str) -> &Self {
        self.push(call_key(&C::SELECTOR), Reply::Err(-32000, message.to_string()))
    }

    /// Params of every request made with `method`.
    pub fn requests(&self, method: &str) -> Vec<Value> {
        self.requests
            .borrow()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    /// Transaction objects passed to `eth_sendTransaction`.
    pub fn sent(&self) -> Vec<Value> {
        self.requests("eth_sendTransaction")
            .into_iter()
            .map(|params| params[0].clone())
            .collect()
    }

    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

fn call_key(selector: &[u8]) -> String {
    format!("eth_call:0x{}", hex::encode(selector))
}

fn key_for(method: &str, params: &Value) -> String {
    if method == "eth_call" {
        if let Some(data) = params[0]["data"].as_str() {
            return format!("eth_call:{}", &data[..10.min(data.len())]);
        }
    }
    method.to_string()
}

#[async_trait(?Send)]
impl Eip1193 for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        self.requests
            .borrow_mut()
            .push((method.to_string(), params.clone()));
        let key = key_for(method, &params);
        let mut replies = self.replies.borrow_mut();
        let queue = replies.get_mut(&key).ok_or_else(|| EvmError::Rpc {
            code: -32601,
            message: format!("no mock reply for {}", key),
        })?;
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        match reply {
            Some(Reply::Ok(value)) => Ok(value),
            Some(Reply::Err(code, message)) => Err(EvmError::from_rpc(code, message)),
            None => Err(EvmError::malformed(method, "empty reply queue")),
        }
    }

    async fn sleep(&self, _millis: u32) {
        self.sleeps.set(self.sleeps.get() + 1);
    }
}

pub fn client() -> EvmClient<MockProvider> {
    EvmClient::new(MockProvider::new()).with_receipt_polling(0, 5)
}

pub fn hex_value(bytes: &[u8]) -> Value {
    Value::String(format!("0x{}", hex::encode(bytes)))
}

pub fn tx_hash(n: u8) -> B256 {
    B256::repeat_byte(n)
}

pub fn receipt(hash: B256, success: bool, logs: Value) -> Value {
    json!({
        "transactionHash": hash.to_string(),
        "blockNumber": "0x1",
        "status": if success { "0x1" } else { "0x0" },
        "logs": logs,
    })
}

/// Script a transaction that is mined successfully on the first poll.
pub fn mine(provider: &MockProvider, hash: B256, logs: Value) {
    provider
        .on("eth_sendTransaction", json!(hash.to_string()))
        .on("eth_getTransactionReceipt", receipt(hash, true, logs));
}

pub fn to_address(value: &Value) -> Address {
    serde_json::from_value(value.clone()).expect("address")
}

pub fn selector_of(tx: &Value) -> String {
    tx["data"].as_str().unwrap_or_default().chars().take(10).collect()
}

/// Decode a sent transaction's calldata as `C`.
pub fn decode_tx<C: SolCall>(tx: &Value) -> C {
    let data = hex::decode(tx["data"].as_str().unwrap_or_default()).expect("hex calldata");
    C::abi_decode(&data).expect("calldata")
}

pub fn selector_hex<C: SolCall>() -> String {
    format!("0x{}", hex::encode(C::SELECTOR))
}

pub const OWNER: Address = Address::repeat_byte(0x11);
pub const RECIPIENT: Address = Address::repeat_byte(0x22);
