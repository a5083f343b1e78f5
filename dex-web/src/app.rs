use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use shared::wallet::WalletEvent;

use crate::components::{Header, Toaster, TxSubmittedDialog, UnsupportedChain};
use crate::pages::{IndexPage, LimitPage, NotFound, SendPage, SwapPage};
use crate::services::ethereum;
use crate::state::{provide_settings_context, provide_toast_context, provide_wallet_context};

#[component]
pub fn App() -> impl IntoView {
    let toasts = provide_toast_context();
    let settings = provide_settings_context();
    let wallet = provide_wallet_context(settings, toasts);

    settings.apply_theme();

    // Provider listeners are registered once for the page lifetime
    ethereum::on_accounts_changed(move |accounts| wallet.apply(WalletEvent::AccountsChanged(accounts)));
    ethereum::on_chain_changed(move |chain_id| wallet.apply(WalletEvent::ChainChanged(chain_id)));

    // Adopt the wallet's network, then reconnect silently if authorised
    spawn_local(async move {
        if ethereum::wallet_available() {
            match ethereum::client().chain_id().await {
                Ok(chain_id) => {
                    if let Some(notice) = settings.apply_detected_chain(Some(chain_id)) {
                        toasts.push(notice);
                    }
                }
                Err(e) => log::warn!("Chain detection failed: {}", e),
            }
        }
        wallet.restore().await;
    });

    view! {
        <Router>
            <div class="app">
                <Header/>
                <main class="main">
                    <Show
                        when=move || settings.active_key.get().is_some()
                        fallback=|| view! { <UnsupportedChain/> }
                    >
                        <Routes fallback=|| view! { <NotFound/> }>
                            <Route path=path!("/") view=IndexPage/>
                            <Route path=path!("/swap") view=SwapPage/>
                            <Route path=path!("/send") view=SendPage/>
                            <Route path=path!("/limit") view=LimitPage/>
                        </Routes>
                    </Show>
                </main>
                <Toaster/>
                <TxSubmittedDialog/>
            </div>
        </Router>
    }
}
