use leptos::prelude::*;
use shared::chains::{Chain, SWITCH_TARGETS};

use crate::state::use_wallet_context;

/// Shown instead of the panels while the wallet sits on an unknown network.
#[component]
pub fn UnsupportedChain() -> impl IntoView {
    let wallet = use_wallet_context();

    view! {
        <div class="card unsupported-chain">
            <h2 class="card-title">"Unsupported Network"</h2>
            <p class="muted">"Please switch to one of the supported networks to continue."</p>
            <div class="switch-options">
                {SWITCH_TARGETS
                    .iter()
                    .map(|&key| {
                        let chain = Chain::by_key(key);
                        view! {
                            <button class="btn btn-secondary" on:click=move |_| wallet.switch_chain(chain)>
                                {format!("Switch to {}", chain.name)}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
