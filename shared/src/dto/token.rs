use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::units::{amount_value, to_fixed};

/// Token metadata plus the last balance read for the connected account.
///
/// `balance` is a human-readable decimal string (already divided by
/// `10^decimals`). It only changes when a balance refresh is explicitly
/// requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default)]
    pub balance: String,
}

impl Token {
    pub fn new(
        address: Address,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            balance: String::new(),
        }
    }

    pub fn with_balance(mut self, balance: impl Into<String>) -> Self {
        self.balance = balance.into();
        self
    }

    /// Cached balance as a number; unknown or unparsable balances read as zero.
    pub fn balance_value(&self) -> f64 {
        amount_value(&self.balance).unwrap_or(0.0)
    }

    /// Balance shown in the selector rows, four fraction digits.
    pub fn display_balance(&self) -> String {
        if self.balance.is_empty() {
            return "0.0000".to_string();
        }
        to_fixed(&self.balance, 4)
    }

    /// Case-insensitive match on symbol, name or address.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.symbol.to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
            || self.address.to_string().to_lowercase().contains(&query)
    }
}
