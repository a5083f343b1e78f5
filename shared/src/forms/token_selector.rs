//! Token picker: filtering, address import and selection bookkeeping.

use alloy_primitives::Address;

use crate::dto::Token;
use crate::notify::Notification;
use crate::validation::is_address;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSelectorState {
    pub open: bool,
    pub query: String,
    pub importing: bool,
}

impl TokenSelectorState {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the dialog and drop the search text.
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.importing = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The query parsed as a contract address, if it is one.
    pub fn import_candidate(&self) -> Option<Address> {
        import_candidate(&self.query)
    }
}

/// Tokens matching `query` (symbol, name or address, case-insensitive),
/// minus the token already picked on the other side.
pub fn filter_tokens<'a>(
    tokens: &'a [Token],
    query: &str,
    exclude: Option<&Address>,
) -> Vec<&'a Token> {
    tokens
        .iter()
        .filter(|t| exclude != Some(&t.address))
        .filter(|t| t.matches(query))
        .collect()
}

pub fn import_candidate(query: &str) -> Option<Address> {
    let query = query.trim();
    if !is_address(query) {
        return None;
    }
    query.parse().ok()
}

pub fn added_notice(token: &Token) -> Notification {
    Notification::success(
        "Token Added",
        format!("{} ({}) has been added to the list.", token.symbol, token.name),
    )
}

pub fn exists_notice(token: &Token) -> Notification {
    Notification::info(
        "Token Already Exists",
        format!("{} is already in the list.", token.symbol),
    )
}

pub fn invalid_notice() -> Notification {
    Notification::destructive(
        "Invalid Token",
        "Could not read token details at this address.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::{Chain, ChainKey};

    #[test]
    fn test_filter_tokens() {
        let tokens = Chain::by_key(ChainKey::Base).default_tokens();
        assert_eq!(filter_tokens(&tokens, "", None).len(), 2);
        assert_eq!(filter_tokens(&tokens, "usd", None)[0].symbol, "USDC");
        assert_eq!(filter_tokens(&tokens, "ETHER", None)[0].symbol, "ETH");
        assert!(filter_tokens(&tokens, "doge", None).is_empty());

        let eth = tokens[0].address;
        let remaining = filter_tokens(&tokens, "", Some(&eth));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].symbol, "USDC");
    }

    #[test]
    fn test_import_candidate() {
        assert!(import_candidate(" 0x4ed4E862860beD51a9570b96d89aF5E1B0Efefed ").is_some());
        assert!(import_candidate("DEGEN").is_none());
        assert!(import_candidate("0x4ed4").is_none());
    }

    #[test]
    fn test_close_clears_query() {
        let mut state = TokenSelectorState::default();
        state.open();
        state.set_query("usdc");
        state.close();
        assert!(!state.open);
        assert!(state.query.is_empty());
    }

    #[test]
    fn test_notice_texts() {
        let token = Chain::by_key(ChainKey::Base).default_tokens().remove(1);
        assert_eq!(
            added_notice(&token).description,
            "USDC (USD Coin) has been added to the list."
        );
        assert_eq!(exists_notice(&token).description, "USDC is already in the list.");
    }
}
