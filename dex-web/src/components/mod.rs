pub mod amount_field;
pub mod header;
pub mod limit_order;
pub mod navbar;
pub mod send_token;
pub mod swap_card;
pub mod swap_settings;
pub mod toaster;
pub mod token_image;
pub mod token_selector;
pub mod tx_dialog;
pub mod unsupported_chain;
pub mod wallet_button;

pub use amount_field::AmountField;
pub use header::Header;
pub use limit_order::LimitOrder;
pub use navbar::Navbar;
pub use send_token::SendToken;
pub use swap_card::SwapCard;
pub use swap_settings::SwapSettings;
pub use toaster::Toaster;
pub use token_image::{TokenButton, TokenImage};
pub use token_selector::TokenSelector;
pub use tx_dialog::TxSubmittedDialog;
pub use unsupported_chain::UnsupportedChain;
pub use wallet_button::WalletButton;
