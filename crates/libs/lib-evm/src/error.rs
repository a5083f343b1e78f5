//! Error types for wallet and contract calls.

use alloy_primitives::B256;
use shared::units::AmountError;
use thiserror::Error;

/// EIP-1193 code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;
/// `wallet_switchEthereumChain` code for a chain the wallet does not know.
pub const CHAIN_NOT_ADDED_CODE: i64 = 4902;

pub type Result<T> = std::result::Result<T, EvmError>;

#[derive(Debug, Error)]
pub enum EvmError {
    #[error("No Ethereum wallet detected")]
    NoWallet,

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Request rejected by user")]
    UserRejected,

    #[error("Chain {0} has not been added to the wallet")]
    ChainNotAdded(u64),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("ABI error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("Transaction {0} reverted")]
    Reverted(B256),

    #[error("No receipt for {hash} after {polls} polls")]
    ReceiptTimeout { hash: B256, polls: u32 },

    #[error("Malformed response to {method}: {reason}")]
    Malformed { method: String, reason: String },

    #[error("Limit orders are not available on {0}")]
    LimitOrdersUnavailable(String),
}

impl EvmError {
    /// Classify an error object returned by the provider.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        match code {
            USER_REJECTED_CODE => EvmError::UserRejected,
            _ => EvmError::Rpc {
                code,
                message: message.into(),
            },
        }
    }

    pub fn malformed(method: &str, reason: impl ToString) -> Self {
        EvmError::Malformed {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, EvmError::UserRejected)
    }

    /// Short text for a toast description.
    pub fn user_message(&self) -> String {
        match self {
            EvmError::NoWallet => "Please install MetaMask or another Ethereum wallet".to_string(),
            EvmError::NoAccounts => "Connect your wallet first".to_string(),
            EvmError::UserRejected => "You rejected the request in your wallet".to_string(),
            EvmError::ChainNotAdded(_) => "Add this network to your wallet first".to_string(),
            EvmError::Rpc { message, .. } => message.clone(),
            EvmError::Reverted(_) => "The transaction was reverted".to_string(),
            EvmError::ReceiptTimeout { .. } => {
                "The transaction is still pending. Check the explorer for its status".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rpc_maps_user_rejection() {
        assert!(EvmError::from_rpc(4001, "User denied").is_user_rejection());
        assert!(matches!(
            EvmError::from_rpc(-32000, "execution reverted"),
            EvmError::Rpc { code: -32000, .. }
        ));
    }

    #[test]
    fn test_user_message() {
        let err = EvmError::from_rpc(-32603, "insufficient funds for gas");
        assert_eq!(err.user_message(), "insufficient funds for gas");
        assert_eq!(
            EvmError::UserRejected.user_message(),
            "You rejected the request in your wallet"
        );
    }
}
