//! # Application Errors
//!
//! Everything a UI action can fail with, funnelled into one enum so
//! components can log it and turn it into a toast the same way.

use lib_evm::EvmError;
use shared::settings::StorageError;
use shared::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// No connected account, or the wallet is on an unsupported network
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// RPC, ABI or transaction failure from the contract layer
    #[error(transparent)]
    Contract(#[from] EvmError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn not_connected() -> Self {
        AppError::Wallet("Please connect your wallet first".to_string())
    }

    /// Text suitable for a toast description.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Wallet(message) => message.clone(),
            AppError::Contract(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        assert_eq!(
            AppError::not_connected().user_message(),
            "Please connect your wallet first"
        );
        let rejected = AppError::from(EvmError::UserRejected);
        assert_eq!(rejected.user_message(), EvmError::UserRejected.user_message());
        let invalid = AppError::from(ValidationError::SameToken);
        assert_eq!(invalid.user_message(), ValidationError::SameToken.to_string());
    }
}
