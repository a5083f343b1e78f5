//! # Panel Form State
//!
//! One reducer per panel. The web components hold a form struct in a signal,
//! call `dispatch` from event handlers and render from the derived getters,
//! so validity rules and button labels are plain functions tested here.

use alloy_primitives::Address;

use crate::chains::Chain;
use crate::dto::Token;

pub mod limit;
pub mod send;
pub mod swap;
pub mod token_selector;

/// Token defaults handed to a form when the active chain changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTokens {
    pub native: Token,
    pub usdc: Token,
    pub tokens: Vec<Token>,
}

impl From<&Chain> for ChainTokens {
    fn from(chain: &Chain) -> Self {
        Self {
            native: Token::from(&chain.native_token),
            usdc: Token::from(&chain.usdc_token),
            tokens: chain.default_tokens(),
        }
    }
}

impl ChainTokens {
    /// Use an already-populated list (imported tokens, cached balances)
    /// instead of the chain defaults.
    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        let pick = |wanted: &Token| {
            tokens
                .iter()
                .find(|t| t.address == wanted.address)
                .cloned()
                .unwrap_or_else(|| wanted.clone())
        };
        self.native = pick(&self.native);
        self.usdc = pick(&self.usdc);
        self.tokens = tokens;
        self
    }
}

/// Refresh a cached balance on a selected token slot.
pub(crate) fn refresh_slot(slot: &mut Option<Token>, address: &Address, balance: &str) {
    if let Some(token) = slot.as_mut().filter(|t| t.address == *address) {
        token.balance = balance.to_string();
    }
}

/// Refresh a cached balance inside a token list.
pub(crate) fn refresh_list(list: &mut [Token], address: &Address, balance: &str) {
    if let Some(token) = list.iter_mut().find(|t| t.address == *address) {
        token.balance = balance.to_string();
    }
}
