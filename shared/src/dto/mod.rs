//! # Data Transfer Objects (DTOs)
//!
//! Records passed between the contract layer (`lib-evm`) and the UI.
//!
//! ## Module Organization
//!
//! - [`token`] - ERC-20 token metadata with a cached balance
//! - [`order`] - Limit orders as returned by the order contract, enriched for display
//!
//! ## Serialization Format
//!
//! All DTOs derive `Serialize` and `Deserialize`:
//!
//! - **Addresses**: EIP-55 checksummed hex strings
//! - **Raw amounts**: `U256` serialized as `0x`-prefixed hex quantities
//! - **Balances**: decimal strings, already scaled by the token's decimals

pub mod order;
pub mod token;

pub use order::*;
pub use token::*;
