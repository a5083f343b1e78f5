use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_evm::dex;
use shared::chains::Chain;
use shared::dto::Token;
use shared::forms::send::{self, SendAction, SendForm};
use shared::forms::ChainTokens;

use super::{TokenButton, TokenSelector};
use crate::error::AppError;
use crate::services::ethereum::client;
use crate::state::{use_settings_context, use_toast_context, use_wallet_context};
use crate::utils::format::format_balance;

/// Transfer the native coin or an ERC-20 to another address.
#[component]
pub fn SendToken() -> impl IntoView {
    let settings = use_settings_context();
    let wallet = use_wallet_context();
    let toasts = use_toast_context();

    let form = RwSignal::new(SendForm::default());
    let picker_open = RwSignal::new(false);

    // Transfers can finish after the panel is gone
    let dispatch = move |action: SendAction| {
        form.try_update(|f| f.dispatch(action));
    };

    let refresh_balance = move |token: Token| {
        spawn_local(async move {
            if let Some(balance) = wallet.fetch_balance(&token).await {
                dispatch(SendAction::UpdateTokenBalance {
                    address: token.address,
                    balance,
                });
            }
        });
    };

    Effect::new(move |_| {
        let Some(key) = settings.active_key.get() else {
            return;
        };
        let tokens = settings.token_list.get_untracked();
        dispatch(SendAction::ChainChanged(
            ChainTokens::from(Chain::by_key(key)).with_tokens(tokens),
        ));
    });

    let token_address = Memo::new(move |_| form.with(|f| f.token.as_ref().map(|t| t.address)));
    Effect::new(move |_| {
        token_address.track();
        if wallet.address().is_none() {
            return;
        }
        if let Some(token) = form.with_untracked(|f| f.token.clone()) {
            refresh_balance(token);
        }
    });

    let connected = move || wallet.connection.with(|c| c.is_connected());

    let on_send = move || {
        let request = match form.with_untracked(|f| f.validate_for_submit()) {
            Ok(request) => request,
            Err(e) => {
                toasts.push(send::validation_notice(&e));
                return;
            }
        };
        let (owner, chain) = match wallet.session() {
            Ok(session) => session,
            Err(e) => {
                toasts.report("Transaction Failed", &e);
                return;
            }
        };

        dispatch(SendAction::BeginSend);
        spawn_local(async move {
            match dex::send_token(&client(), chain, owner, &request).await {
                Ok(receipt) => {
                    log::info!("Transfer confirmed: {}", receipt.tx_hash());
                    toasts.push(send::sent_notice(&request));
                    wallet.show_submitted(chain, &receipt);
                    dispatch(SendAction::Reset);
                    refresh_balance(request.token.clone());
                }
                Err(e) => {
                    let error = AppError::from(e);
                    log::error!("Transfer failed: {}", error);
                    toasts.push(send::failure_notice(error.user_message()));
                }
            }
            dispatch(SendAction::EndSend);
        });
    };

    let button_label = move || {
        if connected() {
            form.with(|f| f.button_text())
        } else {
            "Connect Wallet"
        }
    };
    let button_disabled = move || connected() && form.with(|f| f.is_sending || !f.is_valid());

    view! {
        <div class="card send-card">
            <div class="card-header">
                <h2 class="card-title">"Send"</h2>
            </div>

            <div class="amount-field">
                <div class="field-header">
                    <span class="muted">"Token"</span>
                    <span class="muted">
                        {move || form.with(|f| {
                            f.token
                                .as_ref()
                                .map(|t| format!("Balance: {}", format_balance(&t.balance)))
                                .unwrap_or_default()
                        })}
                    </span>
                </div>
                <div class="field-body">
                    <input
                        class="amount-input"
                        type="text"
                        inputmode="decimal"
                        placeholder="0.0"
                        prop:value=move || form.with(|f| f.amount.clone())
                        on:input=move |ev| dispatch(SendAction::SetAmount(event_target_value(&ev)))
                    />
                    <TokenButton
                        token=Signal::derive(move || form.with(|f| f.token.clone()))
                        on_click=Callback::new(move |_| picker_open.set(true))
                    />
                </div>
            </div>

            <label class="field-label" for="recipient">"Recipient"</label>
            <input
                id="recipient"
                class="input"
                type="text"
                placeholder="0x..."
                spellcheck="false"
                prop:value=move || form.with(|f| f.recipient.clone())
                on:input=move |ev| dispatch(SendAction::SetRecipient(event_target_value(&ev)))
            />

            <button
                class="btn btn-primary btn-block"
                disabled=button_disabled
                on:click=move |_| if connected() { on_send() } else { wallet.connect() }
            >
                {button_label}
            </button>

            <Show when=move || picker_open.get()>
                <TokenSelector
                    tokens=settings.token_list
                    exclude=Signal::derive(|| None)
                    on_select=Callback::new(move |token: Token| dispatch(SendAction::SetToken(token)))
                    on_close=Callback::new(move |_| picker_open.set(false))
                />
            </Show>
        </div>
    }
}
