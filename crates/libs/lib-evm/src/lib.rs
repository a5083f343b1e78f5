//! # EVM Library
//!
//! Contract integration for the DEX front end: ABI bindings, an EIP-1193
//! provider seam, a JSON-RPC client on top of it and the transaction helpers
//! used by the swap, send and limit-order panels.
//!
//! Nothing here knows about the browser. The web app implements
//! [`Eip1193`] over `window.ethereum`; tests implement it with a scripted mock.

pub mod abi;
pub mod client;
pub mod dex;
pub mod error;
pub mod provider;
pub mod types;

pub use client::EvmClient;
pub use error::{EvmError, Result};
pub use provider::Eip1193;
pub use types::{Log, Receipt, TxRequest};
