//! # Shared DEX Domain Library
//!
//! Platform-independent types and view-models used by the contract layer
//! (`lib-evm`) and the browser front end (`dex-web`). Nothing in this crate
//! touches the network or the DOM, so every rule here is testable natively.
//!
//! ## Structure
//!
//! - **[`chains`]**: Static registry of supported networks and their contract addresses
//! - **[`dto`]**: Token and limit-order records exchanged between contract layer and UI
//! - **[`units`]**: Decimal amount parsing, scaling and display formatting
//! - **[`validation`]**: Address and amount validation with [`ValidationError`]
//! - **[`forms`]**: Reducer-style state for the swap, send, limit-order and token-selector panels
//! - **[`settings`]**: Active chain, token list and persisted preferences
//! - **[`wallet`]**: Wallet connection state machine
//! - **[`notify`]**: Toast notification records
//! - **[`utils`]**: Address shortening for display
//!
//! ## Usage
//!
//! ```rust
//! use shared::chains::{Chain, ChainKey};
//! use shared::forms::swap::{SwapAction, SwapForm};
//!
//! let chain = Chain::by_key(ChainKey::Base);
//! let mut form = SwapForm::default();
//! form.dispatch(SwapAction::ChainChanged(chain.into()));
//! form.dispatch(SwapAction::SetFromAmount("1".into()));
//! form.dispatch(SwapAction::SetToAmount("2500".into()));
//!
//! assert_eq!(form.rate().as_deref(), Some("2500.000000"));
//! ```

pub mod chains;
pub mod dto;
pub mod forms;
pub mod notify;
pub mod settings;
pub mod units;
pub mod utils;
pub mod validation;
pub mod wallet;

pub use chains::{Chain, ChainKey};
pub use dto::*;
pub use notify::{Notification, NotificationKind};
pub use utils::*;
pub use validation::ValidationError;
