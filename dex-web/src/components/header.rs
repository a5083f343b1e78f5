use leptos::prelude::*;
use leptos_router::components::A;
use shared::chains::{Chain, ChainKey};
use shared::settings::Theme;

use super::{Navbar, WalletButton};
use crate::state::{use_settings_context, use_toast_context, use_wallet_context};
use crate::utils::constants::APP_NAME;

#[component]
pub fn Header() -> impl IntoView {
    let settings = use_settings_context();

    view! {
        <header class="header">
            <A href="/">
                <span class="logo">{APP_NAME}</span>
            </A>
            <Navbar/>
            <div class="header-actions">
                <ChainSelector/>
                <button
                    class="icon-btn"
                    title="Toggle theme"
                    on:click=move |_| settings.toggle_theme()
                >
                    {move || match settings.theme.get() {
                        Theme::Dark => "☀",
                        Theme::Light => "☾",
                    }}
                </button>
                <WalletButton/>
            </div>
        </header>
    }
}

/// Network dropdown. With a connected wallet the wallet is asked to switch;
/// otherwise only the local selection changes.
#[component]
fn ChainSelector() -> impl IntoView {
    let settings = use_settings_context();
    let wallet = use_wallet_context();
    let toasts = use_toast_context();

    let on_change = move |ev: web_sys::Event| {
        let Ok(key) = event_target_value(&ev).parse::<ChainKey>() else {
            return;
        };
        if wallet.connection.with_untracked(|c| c.is_connected()) {
            wallet.switch_chain(Chain::by_key(key));
        } else if let Some(notice) = settings.select_chain(Some(key)) {
            toasts.push(notice);
        }
    };

    view! {
        <select
            class="chain-select"
            prop:value=move || settings.active_key.get().map(|k| k.as_str()).unwrap_or_default()
            on:change=on_change
        >
            {Chain::all()
                .iter()
                .map(|chain| view! { <option value=chain.key.as_str()>{chain.name}</option> })
                .collect_view()}
        </select>
    }
}
