//! Limit order panel reducer.
//!
//! Buy orders lock native currency and name the token to receive; sell
//! orders lock the token itself. Prices are entered in USD.

use alloy_primitives::Address;

use super::{refresh_list, refresh_slot, ChainTokens};
use crate::dto::{Order, OrderType, Token};
use crate::notify::Notification;
use crate::units::{amount_value, is_decimal_input};
use crate::validation::{validate_amount, validate_positive_amount, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitAction {
    /// Switching mode clears both amount fields
    SetMode(OrderType),
    SetToken(Token),
    SetPrice(String),
    SetEthAmount(String),
    SetTokenAmount(String),
    ChainChanged(ChainTokens),
    /// Follow the settings token list (imports, refreshed balances)
    SetTokenList(Vec<Token>),
    BeginSubmit,
    EndSubmit,
    /// Clear the entry fields after an order was placed
    Reset,
    OrdersLoading,
    OrdersLoaded(Vec<Order>),
    CancelStarted(u64),
    CancelFinished,
    UpdateTokenBalance { address: Address, balance: String },
}

/// Validated order ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRequest {
    Buy {
        token: Token,
        price: String,
        eth_amount: String,
    },
    Sell {
        token: Token,
        price: String,
        amount: String,
    },
}

impl OrderRequest {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderRequest::Buy { .. } => OrderType::Buy,
            OrderRequest::Sell { .. } => OrderType::Sell,
        }
    }

    pub fn token(&self) -> &Token {
        match self {
            OrderRequest::Buy { token, .. } | OrderRequest::Sell { token, .. } => token,
        }
    }

    pub fn price(&self) -> &str {
        match self {
            OrderRequest::Buy { price, .. } | OrderRequest::Sell { price, .. } => price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOrderForm {
    pub mode: OrderType,
    pub token: Option<Token>,
    pub price: String,
    pub eth_amount: String,
    pub token_amount: String,
    /// Tradable tokens; the chain's native token is never listed
    pub token_list: Vec<Token>,
    native: Option<Address>,
    pub is_submitting: bool,
    pub orders: Vec<Order>,
    pub is_loading_orders: bool,
    pub cancelling: Option<u64>,
}

impl Default for LimitOrderForm {
    fn default() -> Self {
        Self {
            mode: OrderType::Buy,
            token: None,
            price: String::new(),
            eth_amount: String::new(),
            token_amount: String::new(),
            token_list: Vec::new(),
            native: None,
            is_submitting: false,
            orders: Vec::new(),
            is_loading_orders: false,
            cancelling: None,
        }
    }
}

impl LimitOrderForm {
    pub fn dispatch(&mut self, action: LimitAction) {
        match action {
            LimitAction::SetMode(mode) => {
                if self.mode != mode {
                    self.mode = mode;
                    self.eth_amount.clear();
                    self.token_amount.clear();
                }
            }
            LimitAction::SetToken(token) => self.token = Some(token),
            LimitAction::SetPrice(price) => {
                if is_decimal_input(&price) {
                    self.price = price;
                }
            }
            LimitAction::SetEthAmount(amount) => {
                if is_decimal_input(&amount) {
                    self.eth_amount = amount;
                }
            }
            LimitAction::SetTokenAmount(amount) => {
                if is_decimal_input(&amount) {
                    self.token_amount = amount;
                }
            }
            LimitAction::ChainChanged(chain) => {
                self.native = Some(chain.native.address);
                self.set_token_list(chain.tokens);
                self.token = Some(chain.usdc);
                self.price.clear();
                self.eth_amount.clear();
                self.token_amount.clear();
                self.orders.clear();
            }
            LimitAction::SetTokenList(tokens) => self.set_token_list(tokens),
            LimitAction::BeginSubmit => self.is_submitting = true,
            LimitAction::EndSubmit => self.is_submitting = false,
            LimitAction::Reset => {
                self.price.clear();
                self.eth_amount.clear();
                self.token_amount.clear();
            }
            LimitAction::OrdersLoading => self.is_loading_orders = true,
            LimitAction::OrdersLoaded(orders) => {
                self.orders = orders;
                self.is_loading_orders = false;
            }
            LimitAction::CancelStarted(id) => self.cancelling = Some(id),
            LimitAction::CancelFinished => self.cancelling = None,
            LimitAction::UpdateTokenBalance { address, balance } => {
                refresh_slot(&mut self.token, &address, &balance);
                refresh_list(&mut self.token_list, &address, &balance);
            }
        }
    }

    fn set_token_list(&mut self, tokens: Vec<Token>) {
        let native = self.native;
        self.token_list = tokens
            .into_iter()
            .filter(|t| Some(t.address) != native)
            .collect();
    }

    pub fn is_valid(&self) -> bool {
        self.order_request().is_ok()
    }

    pub fn button_text(&self) -> &'static str {
        if self.is_submitting {
            return "Placing Order...";
        }
        if self.token.is_none() {
            return "Select token";
        }
        let amount = match self.mode {
            OrderType::Buy => &self.eth_amount,
            OrderType::Sell => &self.token_amount,
        };
        let positive = |s: &str| amount_value(s).is_some_and(|v| v > 0.0);
        if !positive(&self.price) || !positive(amount) {
            return "Enter amount and price";
        }
        if !self.is_valid() {
            return "Insufficient balance";
        }
        match self.mode {
            OrderType::Buy => "Place Buy Order",
            OrderType::Sell => "Place Sell Order",
        }
    }

    /// Buy: price and native amount positive. Sell: price positive and
    /// `0 < amount <= cached balance`.
    pub fn order_request(&self) -> Result<OrderRequest, ValidationError> {
        let token = self.token.clone().ok_or(ValidationError::MissingToken)?;
        validate_positive_amount(&self.price)?;
        match self.mode {
            OrderType::Buy => {
                validate_positive_amount(&self.eth_amount)?;
                Ok(OrderRequest::Buy {
                    token,
                    price: self.price.clone(),
                    eth_amount: self.eth_amount.clone(),
                })
            }
            OrderType::Sell => {
                validate_amount(&self.token_amount, &token.balance)?;
                Ok(OrderRequest::Sell {
                    token,
                    price: self.price.clone(),
                    amount: self.token_amount.clone(),
                })
            }
        }
    }

    pub fn open_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| o.can_cancel())
    }
}

/// Toast after an order was placed. `order_id` is `None` when the receipt
/// carried no creation event.
pub fn placed_notice(request: &OrderRequest, order_id: Option<u64>) -> Notification {
    let id = order_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    match request {
        OrderRequest::Buy { token, price, .. } => Notification::success(
            "Buy Order Placed",
            format!("Buy order #{} placed for {} at ${}", id, token.symbol, price),
        ),
        OrderRequest::Sell {
            token,
            price,
            amount,
        } => Notification::success(
            "Sell Order Placed",
            format!(
                "Sell order #{} placed for {} {} at ${}",
                id, amount, token.symbol, price
            ),
        ),
    }
}

pub fn order_failed_notice(reason: impl Into<String>) -> Notification {
    Notification::destructive("Order Failed", reason)
}

pub fn cancelled_notice(order_id: u64) -> Notification {
    Notification::success(
        "Order Cancelled",
        format!("Order #{} has been cancelled", order_id),
    )
}

pub fn cancel_failed_notice(reason: impl Into<String>) -> Notification {
    Notification::destructive("Cancel Failed", reason)
}

pub fn coming_soon_text(chain_name: &str) -> String {
    format!("Coming soon for {}", chain_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::{Chain, ChainKey};
    use alloy_primitives::U256;

    fn base_form() -> LimitOrderForm {
        let mut form = LimitOrderForm::default();
        form.dispatch(LimitAction::ChainChanged(Chain::by_key(ChainKey::Base).into()));
        form
    }

    #[test]
    fn test_chain_changed_excludes_native_and_preselects_usdc() {
        let form = base_form();
        assert_eq!(form.token_list.len(), 1);
        assert_eq!(form.token_list[0].symbol, "USDC");
        assert_eq!(form.token.as_ref().unwrap().symbol, "USDC");
    }

    #[test]
    fn test_token_list_follows_imports_without_native() {
        let mut form = base_form();
        let mut tokens = Chain::by_key(ChainKey::Base).default_tokens();
        let imported = Token {
            address: Address::repeat_byte(0x44),
            symbol: "DEGEN".into(),
            name: "Degen".into(),
            decimals: 18,
            balance: String::new(),
        };
        tokens.push(imported.clone());

        form.dispatch(LimitAction::SetTokenList(tokens));
        let symbols: Vec<_> = form.token_list.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, ["USDC", "DEGEN"]);

        form.dispatch(LimitAction::SetToken(imported));
        assert_eq!(form.token.as_ref().unwrap().symbol, "DEGEN");
    }

    #[test]
    fn test_buy_requires_positive_price_and_amount() {
        let mut form = base_form();
        assert!(!form.is_valid());
        assert_eq!(form.button_text(), "Enter amount and price");

        form.dispatch(LimitAction::SetPrice("2500".into()));
        assert!(!form.is_valid());
        form.dispatch(LimitAction::SetEthAmount("0".into()));
        assert!(!form.is_valid());
        form.dispatch(LimitAction::SetEthAmount("0.5".into()));
        assert!(form.is_valid());
        assert_eq!(form.button_text(), "Place Buy Order");

        form.dispatch(LimitAction::SetPrice("0".into()));
        assert!(!form.is_valid());
    }

    #[test]
    fn test_sell_checks_balance() {
        let mut form = base_form();
        form.dispatch(LimitAction::SetMode(OrderType::Sell));
        form.dispatch(LimitAction::SetPrice("1.01".into()));
        form.dispatch(LimitAction::SetTokenAmount("10".into()));
        assert_eq!(form.button_text(), "Insufficient balance");

        let usdc = form.token.as_ref().unwrap().address;
        form.dispatch(LimitAction::UpdateTokenBalance {
            address: usdc,
            balance: "10".into(),
        });
        assert_eq!(form.button_text(), "Place Sell Order");
        assert!(matches!(form.order_request(), Ok(OrderRequest::Sell { .. })));
    }

    #[test]
    fn test_switching_mode_resets_amounts() {
        let mut form = base_form();
        form.dispatch(LimitAction::SetEthAmount("1".into()));
        form.dispatch(LimitAction::SetTokenAmount("5".into()));
        form.dispatch(LimitAction::SetMode(OrderType::Sell));
        assert!(form.eth_amount.is_empty());
        assert!(form.token_amount.is_empty());
    }

    #[test]
    fn test_notices() {
        let form = LimitOrderForm {
            price: "2500".into(),
            eth_amount: "0.1".into(),
            ..base_form()
        };
        let request = form.order_request().unwrap();
        assert_eq!(
            placed_notice(&request, Some(4)).description,
            "Buy order #4 placed for USDC at $2500"
        );
        assert_eq!(
            placed_notice(&request, None).description,
            "Buy order #Unknown placed for USDC at $2500"
        );
        assert_eq!(cancelled_notice(2).description, "Order #2 has been cancelled");
        assert_eq!(coming_soon_text("Arbitrum"), "Coming soon for Arbitrum");
    }

    #[test]
    fn test_orders_loaded() {
        let mut form = base_form();
        form.dispatch(LimitAction::OrdersLoading);
        assert!(form.is_loading_orders);
        let order = Order {
            id: 0,
            order_type: OrderType::Buy,
            token_in: Address::ZERO,
            token_out: Address::ZERO,
            amount_in: U256::from(1u64),
            price_usd: U256::from(1u64),
            owner: Address::ZERO,
            executed: true,
            amount_symbol: "ETH".into(),
            amount_decimals: 18,
        };
        form.dispatch(LimitAction::OrdersLoaded(vec![order]));
        assert!(!form.is_loading_orders);
        assert_eq!(form.orders.len(), 1);
        assert_eq!(form.open_orders().count(), 0);
    }
}
