use leptos::prelude::*;
use shared::wallet::ConnectionState;

use crate::state::use_wallet_context;

#[component]
pub fn WalletButton() -> impl IntoView {
    let wallet = use_wallet_context();

    view! {
        {move || match wallet.connection.get() {
            ConnectionState::Connected { .. } => {
                let label = if wallet.swapping.get() {
                    "Swapping...".to_string()
                } else {
                    wallet.connection.with(|c| c.display_address()).unwrap_or_default()
                };
                view! {
                    <div class="wallet-connected">
                        <span class="wallet-address">{label}</span>
                        <button class="link-btn" on:click=move |_| wallet.disconnect()>
                            "Disconnect"
                        </button>
                    </div>
                }
                .into_any()
            }
            state => {
                let connecting = state.is_connecting();
                view! {
                    <button
                        class="btn btn-primary"
                        disabled=connecting
                        on:click=move |_| wallet.connect()
                    >
                        {if connecting { "Connecting..." } else { "Connect Wallet" }}
                    </button>
                }
                .into_any()
            }
        }}
    }
}
