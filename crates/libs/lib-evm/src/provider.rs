//! EIP-1193 provider seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A wallet provider that accepts JSON-RPC requests, such as the
/// `window.ethereum` object injected by browser wallets.
///
/// Implementations run on a single-threaded event loop, so futures are not
/// required to be `Send`.
#[async_trait(?Send)]
pub trait Eip1193 {
    /// Forward one request. `params` is the positional JSON array.
    /// Provider error objects come back as [`crate::EvmError::from_rpc`].
    async fn request(&self, method: &str, params: Value) -> Result<Value>;

    /// Wait between receipt polls.
    async fn sleep(&self, millis: u32);
}
