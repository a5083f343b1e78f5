use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::units::format_amount;

/// Decimals of the USD price stored on the order contract.
pub const PRICE_DECIMALS: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    /// Decode the on-chain `uint8` discriminant (0 = buy, 1 = sell).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(OrderType::Buy),
            1 => Some(OrderType::Sell),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            OrderType::Buy => 0,
            OrderType::Sell => 1,
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            OrderType::Buy => "BUY",
            OrderType::Sell => "SELL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderType::Buy => "Buy",
            OrderType::Sell => "Sell",
        }
    }
}

/// A limit order owned by the connected account.
///
/// `id` is the position in the contract's per-user order list, which is
/// also the argument `cancelOrder` expects. `amount_symbol` and
/// `amount_decimals` are filled in after the contract read so the list can
/// be rendered without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub order_type: OrderType,
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: U256,
    pub price_usd: U256,
    pub owner: Address,
    pub executed: bool,
    pub amount_symbol: String,
    pub amount_decimals: u8,
}

impl Order {
    /// Amount with its unit, e.g. `0.5 ETH`.
    pub fn display_amount(&self) -> String {
        format!(
            "{} {}",
            format_amount(self.amount_in, self.amount_decimals),
            self.amount_symbol
        )
    }

    /// Trigger price in USD, e.g. `$2500.5`.
    pub fn display_price(&self) -> String {
        format!("${}", format_amount(self.price_usd, PRICE_DECIMALS))
    }

    pub fn can_cancel(&self) -> bool {
        !self.executed
    }

    pub fn status_text(&self) -> &'static str {
        if self.executed {
            "Executed"
        } else {
            "Open"
        }
    }

    pub fn title(&self) -> String {
        format!("Order #{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(order_type: OrderType, executed: bool) -> Order {
        Order {
            id: 3,
            order_type,
            token_in: Address::ZERO,
            token_out: Address::ZERO,
            amount_in: U256::from(500_000_000_000_000_000u64),
            price_usd: U256::from(2_500_500_000u64),
            owner: Address::ZERO,
            executed,
            amount_symbol: "ETH".to_string(),
            amount_decimals: 18,
        }
    }

    #[test]
    fn test_order_type_codes() {
        assert_eq!(OrderType::from_code(0), Some(OrderType::Buy));
        assert_eq!(OrderType::from_code(1), Some(OrderType::Sell));
        assert_eq!(OrderType::from_code(2), None);
        assert_eq!(OrderType::Sell.code(), 1);
        assert_eq!(OrderType::Buy.badge(), "BUY");
    }

    #[test]
    fn test_display_helpers() {
        let open = order(OrderType::Buy, false);
        assert_eq!(open.display_amount(), "0.5 ETH");
        assert_eq!(open.display_price(), "$2500.5");
        assert_eq!(open.title(), "Order #3");
        assert!(open.can_cancel());
        assert_eq!(open.status_text(), "Open");
    }

    #[test]
    fn test_executed_order_cannot_cancel() {
        let done = order(OrderType::Sell, true);
        assert!(!done.can_cancel());
        assert_eq!(done.status_text(), "Executed");
    }
}
