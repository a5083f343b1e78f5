//! # EVM JSON-RPC Client
//!
//! Typed wrapper over an [`Eip1193`] provider: account and chain queries,
//! read-only contract calls decoded through `alloy-sol-types`, transaction
//! submission and bounded receipt polling.
//!
//! ```rust,ignore
//! let client = EvmClient::new(provider).with_receipt_polling(1_000, 120);
//! let owner = client.wallet_address().await?;
//! let balance = client.call(usdc, &IERC20::balanceOfCall { account: owner }).await?;
//! ```

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::{EvmError, Result, CHAIN_NOT_ADDED_CODE};
use crate::provider::Eip1193;
use crate::types::{Receipt, TxRequest};

pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1_000;
pub const DEFAULT_MAX_POLLS: u32 = 120;

pub struct EvmClient<P> {
    provider: P,
    poll_interval_ms: u32,
    max_polls: u32,
}

impl<P: Eip1193> EvmClient<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    pub fn with_receipt_polling(mut self, interval_ms: u32, max_polls: u32) -> Self {
        self.poll_interval_ms = interval_ms;
        self.max_polls = max_polls.max(1);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn request_as<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let value = self.provider.request(method, params).await?;
        serde_json::from_value(value).map_err(|e| EvmError::malformed(method, e))
    }

    /// Accounts already authorized for this origin (no prompt).
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        self.request_as("eth_accounts", json!([])).await
    }

    /// Prompt the user to authorize accounts.
    pub async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.request_as("eth_requestAccounts", json!([])).await
    }

    /// First authorized account.
    pub async fn wallet_address(&self) -> Result<Address> {
        self.accounts()
            .await?
            .first()
            .copied()
            .ok_or(EvmError::NoAccounts)
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let raw: String = self.request_as("eth_chainId", json!([])).await?;
        parse_quantity(&raw).ok_or_else(|| EvmError::malformed("eth_chainId", raw))
    }

    /// Ask the wallet to switch networks. Maps error 4902 to
    /// [`EvmError::ChainNotAdded`].
    pub async fn switch_chain(&self, chain_id: u64) -> Result<()> {
        let params = json!([{ "chainId": format!("0x{:x}", chain_id) }]);
        match self
            .provider
            .request("wallet_switchEthereumChain", params)
            .await
        {
            Ok(_) => {
                info!("Switched wallet to chain {}", chain_id);
                Ok(())
            }
            Err(EvmError::Rpc { code, .. }) if code == CHAIN_NOT_ADDED_CODE => {
                warn!("Chain {} is not added to the wallet", chain_id);
                Err(EvmError::ChainNotAdded(chain_id))
            }
            Err(e) => Err(e),
        }
    }

    /// Native balance in wei.
    pub async fn balance(&self, address: Address) -> Result<U256> {
        self.request_as("eth_getBalance", json!([address, "latest"]))
            .await
    }

    /// Read-only contract call.
    pub async fn call<C: SolCall>(&self, to: Address, call: &C) -> Result<C::Return> {
        self.eth_call::<C>(TxRequest::call(to, call.abi_encode()))
            .await
    }

    /// Read-only call with `from` set, for views that depend on `msg.sender`.
    pub async fn call_as<C: SolCall>(&self, from: Address, to: Address, call: &C) -> Result<C::Return> {
        self.eth_call::<C>(TxRequest::call(to, call.abi_encode()).with_from(from))
            .await
    }

    async fn eth_call<C: SolCall>(&self, tx: TxRequest) -> Result<C::Return> {
        let raw: Bytes = self.request_as("eth_call", json!([tx, "latest"])).await?;
        Ok(C::abi_decode_returns(&raw)?)
    }

    /// Submit a transaction through the wallet and return its hash.
    pub async fn send_transaction(&self, tx: TxRequest) -> Result<B256> {
        debug!("eth_sendTransaction to {}", tx.to);
        let hash: B256 = self
            .request_as("eth_sendTransaction", json!([tx]))
            .await?;
        info!("Transaction submitted: {}", hash);
        Ok(hash)
    }

    /// Poll `eth_getTransactionReceipt` until mined or the poll budget runs out.
    pub async fn wait_for_receipt(&self, hash: B256) -> Result<Receipt> {
        for attempt in 0..self.max_polls {
            let value = self
                .provider
                .request("eth_getTransactionReceipt", json!([hash]))
                .await?;
            if !value.is_null() {
                let receipt: Receipt = serde_json::from_value(value)
                    .map_err(|e| EvmError::malformed("eth_getTransactionReceipt", e))?;
                debug!("Receipt for {} after {} polls", hash, attempt + 1);
                return Ok(receipt);
            }
            self.provider.sleep(self.poll_interval_ms).await;
        }
        warn!("Gave up waiting for {} after {} polls", hash, self.max_polls);
        Err(EvmError::ReceiptTimeout {
            hash,
            polls: self.max_polls,
        })
    }

    /// Submit, wait for the receipt and fail on revert.
    pub async fn send_and_confirm(&self, tx: TxRequest) -> Result<Receipt> {
        let hash = self.send_transaction(tx).await?;
        let receipt = self.wait_for_receipt(hash).await?;
        if !receipt.succeeded() {
            return Err(EvmError::Reverted(hash));
        }
        Ok(receipt)
    }
}

/// Parse a `0x`-prefixed hex quantity (decimal strings are accepted too).
pub fn parse_quantity(raw: &str) -> Option<u64> {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}
