//! Swap panel reducer.
//!
//! Amount edits produce a [`QuoteRequest`]; the caller runs it against the
//! quoter and feeds the answer back as [`SwapAction::QuoteReceived`]. Every
//! edit bumps a sequence number, so an answer that arrives after a newer
//! edit is dropped instead of overwriting the field.

use alloy_primitives::Address;

use super::{refresh_list, refresh_slot, ChainTokens};
use crate::dto::Token;
use crate::notify::Notification;
use crate::units::{amount_value, exchange_rate, is_decimal_input, to_fixed};
use crate::validation::{validate_deadline, validate_slippage, ValidationError};

pub const DEFAULT_SLIPPAGE: f64 = 0.5;
pub const DEFAULT_DEADLINE_MINUTES: u32 = 30;
pub const SLIPPAGE_PRESETS: [f64; 3] = [0.1, 0.5, 1.0];
/// Fraction digits kept from a quote.
pub const QUOTE_PLACES: usize = 10;

/// Which amount field the user edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    From,
    To,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwapAction {
    SetFromAmount(String),
    SetToAmount(String),
    SetFromToken(Token),
    SetToToken(Token),
    SetTokenList(Vec<Token>),
    ResetAmounts,
    ToggleSettings,
    SetSlippage(f64),
    SetDeadline(String),
    BeginSwap,
    EndSwap,
    /// Exchange tokens and amounts in one step
    SwitchTokens,
    ChainChanged(ChainTokens),
    QuoteReceived {
        seq: u64,
        side: Side,
        amount: Option<String>,
    },
    UpdateTokenBalance {
        address: Address,
        balance: String,
    },
    /// Fill the from amount with the cached balance
    SetMax,
}

/// Quote to fetch: `amount` of `token_in` priced in `token_out`. The result
/// belongs in the field opposite `side`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub seq: u64,
    pub side: Side,
    pub token_in: Token,
    pub token_out: Token,
    pub amount: String,
}

/// Everything needed to submit a swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub token_in: Token,
    pub token_out: Token,
    pub amount_in: String,
    /// Quoted output; the minimum accepted is derived from it and `slippage`
    pub quoted_out: String,
    /// Field the user typed. With `Side::To` the input came from a reverse
    /// quote, so `quoted_out` is a target rather than a forward price.
    pub exact: Side,
    pub slippage: f64,
    pub deadline_minutes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwapForm {
    pub from_amount: String,
    pub to_amount: String,
    pub from_token: Option<Token>,
    pub to_token: Option<Token>,
    pub token_list: Vec<Token>,
    pub is_swapping: bool,
    pub show_settings: bool,
    pub slippage: f64,
    pub deadline_minutes: u32,
    quote_seq: u64,
    exact_side: Side,
}

impl Default for SwapForm {
    fn default() -> Self {
        Self {
            from_amount: String::new(),
            to_amount: String::new(),
            from_token: None,
            to_token: None,
            token_list: Vec::new(),
            is_swapping: false,
            show_settings: false,
            slippage: DEFAULT_SLIPPAGE,
            deadline_minutes: DEFAULT_DEADLINE_MINUTES,
            quote_seq: 0,
            exact_side: Side::From,
        }
    }
}

impl SwapForm {
    /// Apply an action. Returns a quote to fetch when an amount or token
    /// changed in a way that invalidates the counter field.
    pub fn dispatch(&mut self, action: SwapAction) -> Option<QuoteRequest> {
        match action {
            SwapAction::SetFromAmount(amount) => {
                if !is_decimal_input(&amount) {
                    return None;
                }
                self.from_amount = amount;
                self.requote(Side::From)
            }
            SwapAction::SetToAmount(amount) => {
                if !is_decimal_input(&amount) {
                    return None;
                }
                self.to_amount = amount;
                self.requote(Side::To)
            }
            SwapAction::SetFromToken(token) => {
                self.from_token = Some(token);
                self.requote(Side::From)
            }
            SwapAction::SetToToken(token) => {
                self.to_token = Some(token);
                self.requote(Side::From)
            }
            SwapAction::SetTokenList(tokens) => {
                self.token_list = tokens;
                None
            }
            SwapAction::ResetAmounts => {
                self.quote_seq += 1;
                self.exact_side = Side::From;
                self.from_amount.clear();
                self.to_amount.clear();
                None
            }
            SwapAction::ToggleSettings => {
                self.show_settings = !self.show_settings;
                None
            }
            SwapAction::SetSlippage(percent) => {
                if let Ok(percent) = validate_slippage(percent) {
                    self.slippage = percent;
                }
                None
            }
            SwapAction::SetDeadline(minutes) => {
                if let Ok(minutes) = validate_deadline(&minutes) {
                    self.deadline_minutes = minutes;
                }
                None
            }
            SwapAction::BeginSwap => {
                self.is_swapping = true;
                None
            }
            SwapAction::EndSwap => {
                self.is_swapping = false;
                None
            }
            SwapAction::SwitchTokens => {
                self.quote_seq += 1;
                std::mem::swap(&mut self.from_token, &mut self.to_token);
                std::mem::swap(&mut self.from_amount, &mut self.to_amount);
                self.exact_side = match self.exact_side {
                    Side::From => Side::To,
                    Side::To => Side::From,
                };
                None
            }
            SwapAction::ChainChanged(chain) => {
                self.quote_seq += 1;
                self.from_token = Some(chain.native);
                self.to_token = Some(chain.usdc);
                self.token_list = chain.tokens;
                self.exact_side = Side::From;
                self.from_amount.clear();
                self.to_amount.clear();
                None
            }
            SwapAction::QuoteReceived { seq, side, amount } => {
                if seq != self.quote_seq {
                    return None;
                }
                let value = amount
                    .filter(|a| !a.is_empty())
                    .map(|a| to_fixed(&a, QUOTE_PLACES))
                    .unwrap_or_default();
                match side {
                    Side::From => self.to_amount = value,
                    Side::To => self.from_amount = value,
                }
                None
            }
            SwapAction::UpdateTokenBalance { address, balance } => {
                refresh_slot(&mut self.from_token, &address, &balance);
                refresh_slot(&mut self.to_token, &address, &balance);
                refresh_list(&mut self.token_list, &address, &balance);
                None
            }
            SwapAction::SetMax => {
                let balance = self.from_token.as_ref()?.balance.clone();
                if balance.is_empty() {
                    return None;
                }
                self.from_amount = balance;
                self.requote(Side::From)
            }
        }
    }

    fn requote(&mut self, side: Side) -> Option<QuoteRequest> {
        self.quote_seq += 1;
        self.exact_side = side;
        let amount = match side {
            Side::From => self.from_amount.clone(),
            Side::To => self.to_amount.clone(),
        };
        if amount.is_empty() {
            match side {
                Side::From => self.to_amount.clear(),
                Side::To => self.from_amount.clear(),
            }
            return None;
        }
        let (from, to) = (self.from_token.clone()?, self.to_token.clone()?);
        let (token_in, token_out) = match side {
            Side::From => (from, to),
            Side::To => (to, from),
        };
        Some(QuoteRequest {
            seq: self.quote_seq,
            side,
            token_in,
            token_out,
            amount,
        })
    }

    pub fn quote_seq(&self) -> u64 {
        self.quote_seq
    }

    pub fn exact_side(&self) -> Side {
        self.exact_side
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let (Some(from), Some(_)) = (&self.from_token, &self.to_token) else {
            return Err(ValidationError::MissingToken);
        };
        let from_value = amount_value(&self.from_amount).unwrap_or(0.0);
        let to_value = amount_value(&self.to_amount).unwrap_or(0.0);
        if from_value <= 0.0 || to_value <= 0.0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if from_value > from.balance_value() {
            return Err(ValidationError::InsufficientBalance {
                requested: self.from_amount.clone(),
                available: from.balance.clone(),
            });
        }
        Ok(())
    }

    pub fn button_text(&self) -> &'static str {
        if self.is_swapping {
            return "Swapping...";
        }
        match self.validate() {
            Ok(()) => "Swap",
            Err(ValidationError::MissingToken) => "Select tokens",
            Err(ValidationError::InsufficientBalance { .. }) => "Insufficient balance",
            Err(_) => "Enter an amount",
        }
    }

    /// `1 FROM = x TO`, six fraction digits.
    pub fn rate(&self) -> Option<String> {
        exchange_rate(&self.from_amount, &self.to_amount)
    }

    pub fn swap_request(&self) -> Result<SwapRequest, ValidationError> {
        self.validate()?;
        let (Some(token_in), Some(token_out)) = (self.from_token.clone(), self.to_token.clone())
        else {
            return Err(ValidationError::MissingToken);
        };
        if token_in.address == token_out.address {
            return Err(ValidationError::SameToken);
        }
        Ok(SwapRequest {
            token_in,
            token_out,
            amount_in: self.from_amount.clone(),
            quoted_out: self.to_amount.clone(),
            exact: self.exact_side,
            slippage: self.slippage,
            deadline_minutes: self.deadline_minutes,
        })
    }
}

pub fn success_notice(request: &SwapRequest) -> Notification {
    Notification::success(
        "Swap Successful",
        format!(
            "Swapped {} {} for {} {}",
            request.amount_in, request.token_in.symbol, request.quoted_out, request.token_out.symbol
        ),
    )
}

pub fn failure_notice() -> Notification {
    Notification::destructive("Swap Failed", "There was an error processing your swap")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::{Chain, ChainKey};

    fn base_form() -> SwapForm {
        let mut form = SwapForm::default();
        form.dispatch(SwapAction::ChainChanged(Chain::by_key(ChainKey::Base).into()));
        form
    }

    #[test]
    fn test_chain_changed_sets_default_pair() {
        let form = base_form();
        assert_eq!(form.from_token.as_ref().unwrap().symbol, "ETH");
        assert_eq!(form.to_token.as_ref().unwrap().symbol, "USDC");
        assert_eq!(form.token_list.len(), 2);
    }

    #[test]
    fn test_rejects_non_decimal_amounts() {
        let mut form = base_form();
        form.dispatch(SwapAction::SetFromAmount("1.5".into()));
        assert!(form.dispatch(SwapAction::SetFromAmount("1.5a".into())).is_none());
        assert!(form.dispatch(SwapAction::SetFromAmount("-2".into())).is_none());
        assert_eq!(form.from_amount, "1.5");
    }

    #[test]
    fn test_amount_edit_issues_quote() {
        let mut form = base_form();
        let req = form.dispatch(SwapAction::SetFromAmount("1".into())).unwrap();
        assert_eq!(req.side, Side::From);
        assert_eq!(req.token_in.symbol, "ETH");
        assert_eq!(req.token_out.symbol, "USDC");

        form.dispatch(SwapAction::QuoteReceived {
            seq: req.seq,
            side: req.side,
            amount: Some("2512.123456789012".into()),
        });
        assert_eq!(form.to_amount, "2512.1234567890");

        let req = form.dispatch(SwapAction::SetToAmount("100".into())).unwrap();
        assert_eq!(req.token_in.symbol, "USDC");
        form.dispatch(SwapAction::QuoteReceived {
            seq: req.seq,
            side: req.side,
            amount: Some("0.04".into()),
        });
        assert_eq!(form.from_amount, "0.0400000000");
    }

    #[test]
    fn test_stale_quote_is_dropped() {
        let mut form = base_form();
        let first = form.dispatch(SwapAction::SetFromAmount("1".into())).unwrap();
        let second = form.dispatch(SwapAction::SetFromAmount("2".into())).unwrap();
        form.dispatch(SwapAction::QuoteReceived {
            seq: second.seq,
            side: Side::From,
            amount: Some("5000".into()),
        });
        form.dispatch(SwapAction::QuoteReceived {
            seq: first.seq,
            side: Side::From,
            amount: Some("2500".into()),
        });
        assert_eq!(form.to_amount, "5000.0000000000");
    }

    #[test]
    fn test_failed_quote_clears_counter_field() {
        let mut form = base_form();
        let req = form.dispatch(SwapAction::SetFromAmount("1".into())).unwrap();
        form.dispatch(SwapAction::QuoteReceived {
            seq: req.seq,
            side: Side::From,
            amount: Some("2500".into()),
        });
        let req = form.dispatch(SwapAction::SetFromAmount("3".into())).unwrap();
        form.dispatch(SwapAction::QuoteReceived {
            seq: req.seq,
            side: Side::From,
            amount: None,
        });
        assert!(form.to_amount.is_empty());
    }

    #[test]
    fn test_clearing_amount_clears_counter_without_quote() {
        let mut form = base_form();
        form.dispatch(SwapAction::SetFromAmount("1".into()));
        form.to_amount = "2500".into();
        assert!(form.dispatch(SwapAction::SetFromAmount(String::new())).is_none());
        assert!(form.to_amount.is_empty());
    }

    #[test]
    fn test_switch_tokens_is_atomic() {
        let mut form = base_form();
        form.from_amount = "1".into();
        form.to_amount = "2500".into();
        form.dispatch(SwapAction::SwitchTokens);
        assert_eq!(form.from_token.as_ref().unwrap().symbol, "USDC");
        assert_eq!(form.to_token.as_ref().unwrap().symbol, "ETH");
        assert_eq!(form.from_amount, "2500");
        assert_eq!(form.to_amount, "1");
    }

    #[test]
    fn test_switch_invalidates_in_flight_quote() {
        let mut form = base_form();
        let req = form.dispatch(SwapAction::SetFromAmount("1".into())).unwrap();
        form.dispatch(SwapAction::SwitchTokens);
        form.dispatch(SwapAction::QuoteReceived {
            seq: req.seq,
            side: Side::From,
            amount: Some("2500".into()),
        });
        assert_eq!(form.to_amount, "1");
    }

    #[test]
    fn test_rate() {
        let mut form = base_form();
        form.from_amount = "1".into();
        form.to_amount = "2500".into();
        assert_eq!(form.rate().as_deref(), Some("2500.000000"));
        form.from_amount.clear();
        assert_eq!(form.rate(), None);
    }

    #[test]
    fn test_validity_and_button_text() {
        let mut form = SwapForm::default();
        assert_eq!(form.button_text(), "Select tokens");

        form.dispatch(SwapAction::ChainChanged(Chain::by_key(ChainKey::Base).into()));
        assert_eq!(form.button_text(), "Enter an amount");

        form.from_amount = "1".into();
        form.to_amount = "2500".into();
        assert_eq!(form.button_text(), "Insufficient balance");
        assert!(!form.is_valid());

        let eth = form.from_token.as_ref().unwrap().address;
        form.dispatch(SwapAction::UpdateTokenBalance {
            address: eth,
            balance: "1".into(),
        });
        assert!(form.is_valid());
        assert_eq!(form.button_text(), "Swap");

        form.dispatch(SwapAction::BeginSwap);
        assert_eq!(form.button_text(), "Swapping...");
    }

    #[test]
    fn test_set_max_uses_cached_balance() {
        let mut form = base_form();
        let eth = form.from_token.as_ref().unwrap().address;
        form.dispatch(SwapAction::UpdateTokenBalance {
            address: eth,
            balance: "0.75".into(),
        });
        let req = form.dispatch(SwapAction::SetMax).unwrap();
        assert_eq!(form.from_amount, "0.75");
        assert_eq!(req.amount, "0.75");
    }

    #[test]
    fn test_settings_validation() {
        let mut form = SwapForm::default();
        form.dispatch(SwapAction::SetSlippage(1.0));
        assert_eq!(form.slippage, 1.0);
        form.dispatch(SwapAction::SetSlippage(75.0));
        assert_eq!(form.slippage, 1.0);

        form.dispatch(SwapAction::SetDeadline("45".into()));
        assert_eq!(form.deadline_minutes, 45);
        form.dispatch(SwapAction::SetDeadline("0".into()));
        assert_eq!(form.deadline_minutes, 45);
    }

    #[test]
    fn test_swap_request_and_notice() {
        let mut form = base_form();
        let eth = form.from_token.as_ref().unwrap().address;
        form.dispatch(SwapAction::UpdateTokenBalance {
            address: eth,
            balance: "2".into(),
        });
        form.from_amount = "1".into();
        form.to_amount = "2500".into();

        let request = form.swap_request().unwrap();
        assert_eq!(request.deadline_minutes, DEFAULT_DEADLINE_MINUTES);
        assert_eq!(
            success_notice(&request).description,
            "Swapped 1 ETH for 2500 USDC"
        );
    }

    #[test]
    fn test_output_edit_marks_request_exact_output() {
        let mut form = base_form();
        let eth = form.from_token.as_ref().unwrap().address;
        form.dispatch(SwapAction::UpdateTokenBalance {
            address: eth,
            balance: "2".into(),
        });

        let request = form
            .dispatch(SwapAction::SetToAmount("2500".into()))
            .unwrap();
        form.dispatch(SwapAction::QuoteReceived {
            seq: request.seq,
            side: Side::To,
            amount: Some("1".into()),
        });
        assert_eq!(form.exact_side(), Side::To);
        let swap = form.swap_request().unwrap();
        assert_eq!(swap.exact, Side::To);
        assert_eq!(swap.amount_in, "1.0000000000");

        // Typing the input again makes the quote a forward price.
        let request = form.dispatch(SwapAction::SetFromAmount("1".into())).unwrap();
        form.dispatch(SwapAction::QuoteReceived {
            seq: request.seq,
            side: Side::From,
            amount: Some("2400".into()),
        });
        assert_eq!(form.swap_request().unwrap().exact, Side::From);
    }

    #[test]
    fn test_switch_tokens_flips_exact_side() {
        let mut form = base_form();
        form.dispatch(SwapAction::SetFromAmount("1".into()));
        form.dispatch(SwapAction::SwitchTokens);
        assert_eq!(form.exact_side(), Side::To);
        form.dispatch(SwapAction::ResetAmounts);
        assert_eq!(form.exact_side(), Side::From);
    }
}
