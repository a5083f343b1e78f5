//! Send panel reducer.

use alloy_primitives::Address;

use super::{refresh_slot, ChainTokens};
use crate::dto::Token;
use crate::notify::Notification;
use crate::units::{amount_value, is_decimal_input};
use crate::utils::truncate_address;
use crate::validation::{is_address, validate_amount, validate_recipient, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendAction {
    SetToken(Token),
    SetAmount(String),
    SetRecipient(String),
    BeginSend,
    EndSend,
    /// Clear amount and recipient after a successful transfer
    Reset,
    ChainChanged(ChainTokens),
    UpdateTokenBalance { address: Address, balance: String },
}

/// Validated transfer ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub token: Token,
    pub amount: String,
    pub recipient: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendForm {
    pub token: Option<Token>,
    pub amount: String,
    pub recipient: String,
    pub is_sending: bool,
}

impl SendForm {
    pub fn dispatch(&mut self, action: SendAction) {
        match action {
            SendAction::SetToken(token) => self.token = Some(token),
            SendAction::SetAmount(amount) => {
                if is_decimal_input(&amount) {
                    self.amount = amount;
                }
            }
            SendAction::SetRecipient(recipient) => self.recipient = recipient,
            SendAction::BeginSend => self.is_sending = true,
            SendAction::EndSend => self.is_sending = false,
            SendAction::Reset => {
                self.amount.clear();
                self.recipient.clear();
            }
            SendAction::ChainChanged(chain) => {
                self.token = Some(chain.native);
                self.amount.clear();
            }
            SendAction::UpdateTokenBalance { address, balance } => {
                refresh_slot(&mut self.token, &address, &balance);
            }
        }
    }

    /// Token selected, 40-hex recipient, and `0 < amount <= balance`.
    pub fn is_valid(&self) -> bool {
        self.validate_for_submit().is_ok()
    }

    pub fn button_text(&self) -> &'static str {
        if self.is_sending {
            return "Sending...";
        }
        let Some(token) = &self.token else {
            return "Select token";
        };
        if self.amount.is_empty() {
            return "Enter amount";
        }
        if self.recipient.is_empty() {
            return "Enter recipient";
        }
        let amount = amount_value(&self.amount).unwrap_or(0.0);
        if amount <= 0.0 {
            return "Enter a valid amount";
        }
        if !is_address(&self.recipient) {
            return "Please enter a valid Ethereum address";
        }
        if amount > token.balance_value() {
            return "Insufficient balance";
        }
        "Send"
    }

    pub fn validate_for_submit(&self) -> Result<SendRequest, ValidationError> {
        let token = self.token.clone().ok_or(ValidationError::MissingToken)?;
        if self.amount.is_empty() {
            return Err(ValidationError::MissingField("Amount"));
        }
        let recipient = validate_recipient(&self.recipient)?;
        validate_amount(&self.amount, &token.balance)?;
        Ok(SendRequest {
            token,
            amount: self.amount.clone(),
            recipient,
        })
    }
}

/// Toast for a request rejected before submission.
pub fn validation_notice(error: &ValidationError) -> Notification {
    match error {
        ValidationError::MissingToken | ValidationError::MissingField(_) => {
            Notification::destructive("Missing information", "Please fill in all fields")
        }
        ValidationError::InvalidAddress(_) => {
            Notification::destructive("Invalid address", "Please enter a valid Ethereum address")
        }
        ValidationError::InsufficientBalance { .. } => Notification::destructive(
            "Insufficient balance",
            "You do not have enough tokens to send",
        ),
        other => Notification::destructive("Invalid amount", other.to_string()),
    }
}

pub fn sent_notice(request: &SendRequest) -> Notification {
    Notification::success(
        "Transaction Sent",
        format!(
            "Sent {} {} to {}",
            request.amount,
            request.token.symbol,
            truncate_address(&request.recipient.to_string())
        ),
    )
}

pub fn failure_notice(reason: impl Into<String>) -> Notification {
    Notification::destructive("Transaction Failed", reason)
}
