pub mod settings;
pub mod toasts;
pub mod wallet;

pub use settings::{provide_settings_context, use_settings_context, SettingsContext};
pub use toasts::{provide_toast_context, use_toast_context, ToastContext};
pub use wallet::{provide_wallet_context, use_wallet_context, WalletContext};
