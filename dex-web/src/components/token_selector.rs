//! Token picker modal with search and import-by-address.

use alloy_primitives::Address;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_evm::dex;
use shared::dto::Token;
use shared::forms::token_selector::{
    added_notice, exists_notice, filter_tokens, invalid_notice, TokenSelectorState,
};
use shared::settings::ImportOutcome;

use super::TokenImage;
use crate::services::ethereum::client;
use crate::state::{use_settings_context, use_toast_context, use_wallet_context};
use crate::utils::format::format_balance;

#[component]
pub fn TokenSelector(
    #[prop(into)] tokens: Signal<Vec<Token>>,
    /// Token already picked on the other side of the pair
    #[prop(into)]
    exclude: Signal<Option<Address>>,
    on_select: Callback<Token>,
    on_close: Callback<()>,
) -> impl IntoView {
    let settings = use_settings_context();
    let wallet = use_wallet_context();
    let toasts = use_toast_context();

    let state = RwSignal::new(TokenSelectorState::default());
    state.update(|s| s.open());

    let filtered = Memo::new(move |_| {
        let query = state.with(|s| s.query.clone());
        let exclude = exclude.get();
        tokens.with(|list| {
            filter_tokens(list, &query, exclude.as_ref())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    // A pasted address that is not listed yet is looked up and imported
    let candidate = Memo::new(move |_| state.with(|s| s.import_candidate()));
    Effect::new(move |_| {
        let Some(address) = candidate.get() else {
            return;
        };
        if tokens.with_untracked(|list| list.iter().any(|t| t.address == address)) {
            return;
        }

        state.update(|s| s.importing = true);
        spawn_local(async move {
            let owner = wallet
                .connection
                .with_untracked(|c| c.address())
                .unwrap_or(Address::ZERO);
            match dex::token_info(&client(), address, owner).await {
                Ok(token) => {
                    log::info!("Importing token {} ({})", token.symbol, token.address);
                    let notice = match settings.import_token(token.clone()) {
                        ImportOutcome::Added => added_notice(&token),
                        ImportOutcome::AlreadyExists => exists_notice(&token),
                    };
                    toasts.push(notice);
                }
                Err(e) => {
                    log::warn!("Token lookup failed for {}: {}", address, e);
                    toasts.push(invalid_notice());
                }
            }
            state.try_update(|s| s.importing = false);
        });
    });

    // Fetch the balance first so the caller receives an up-to-date token
    let select = move |token: Token| {
        spawn_local(async move {
            let mut token = token;
            token.balance = wallet
                .fetch_balance(&token)
                .await
                .unwrap_or_else(|| "0".to_string());
            if state.try_update(|s| s.close()).is_none() {
                return;
            }
            on_select.run(token);
            on_close.run(());
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal token-selector" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"Select a token"</h3>
                    <button class="icon-btn" on:click=move |_| on_close.run(())>"✕"</button>
                </div>

                <input
                    class="input"
                    type="text"
                    placeholder="Search name or paste address"
                    prop:value=move || state.with(|s| s.query.clone())
                    on:input=move |ev| state.update(|s| s.set_query(event_target_value(&ev)))
                />

                <Show when=move || state.with(|s| s.importing)>
                    <p class="muted">"Importing token..."</p>
                </Show>

                <ul class="token-list">
                    <For
                        each=move || filtered.get()
                        key=|token| (token.address, token.balance.clone())
                        children=move |token| {
                            let picked = token.clone();
                            view! {
                                <li class="token-row" on:click=move |_| select(picked.clone())>
                                    <TokenImage symbol=token.symbol.clone()/>
                                    <div class="token-meta">
                                        <span class="token-symbol">{token.symbol.clone()}</span>
                                        <span class="token-name">{token.name.clone()}</span>
                                    </div>
                                    <span class="token-balance">{format_balance(&token.balance)}</span>
                                </li>
                            }
                        }
                    />
                </ul>

                <Show when=move || filtered.with(|list| list.is_empty()) && !state.with(|s| s.importing)>
                    <p class="muted">"No tokens found"</p>
                </Show>
            </div>
        </div>
    }
}
