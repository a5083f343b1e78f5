//! Swap panel.
//!
//! Typing in either field debounces, then asks the quoter for the other
//! side. Answers carry the form's sequence number so a slow quote never
//! overwrites a newer edit.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_evm::dex;
use shared::chains::Chain;
use shared::dto::Token;
use shared::forms::swap::{self, QuoteRequest, Side, SwapAction, SwapForm};
use shared::forms::ChainTokens;

use super::{AmountField, SwapSettings, TokenSelector};
use crate::error::AppError;
use crate::services::ethereum::client;
use crate::state::{use_settings_context, use_toast_context, use_wallet_context};
use crate::utils::constants::QUOTE_DEBOUNCE_MS;
use crate::utils::format::{format_percentage, format_rate};

/// Sequence number of the latest edit, `None` once the panel is unmounted.
fn latest_quote_seq(form: RwSignal<SwapForm>) -> Option<u64> {
    form.try_with_untracked(|f| f.quote_seq())
}

/// Hand a finished quote to the form. False when the panel is gone.
fn deliver_quote(form: RwSignal<SwapForm>, request: &QuoteRequest, amount: Option<String>) -> bool {
    form.try_update(|f| {
        f.dispatch(SwapAction::QuoteReceived {
            seq: request.seq,
            side: request.side,
            amount,
        });
    })
    .is_some()
}

#[component]
pub fn SwapCard() -> impl IntoView {
    let settings = use_settings_context();
    let wallet = use_wallet_context();
    let toasts = use_toast_context();

    let form = RwSignal::new(SwapForm::default());
    let picker = RwSignal::new(None::<Side>);

    let run_quote = move |request: Option<QuoteRequest>| {
        let Some(request) = request else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(QUOTE_DEBOUNCE_MS).await;
            if latest_quote_seq(form) != Some(request.seq) {
                return;
            }
            let Some(chain) = settings.active_chain_untracked() else {
                return;
            };

            let amount = match dex::quote_exact_input_single(
                &client(),
                chain,
                &request.token_in,
                &request.token_out,
                &request.amount,
            )
            .await
            {
                Ok(quote) => Some(quote),
                Err(e) => {
                    log::warn!("Quote failed: {}", e);
                    None
                }
            };
            if !deliver_quote(form, &request, amount) {
                log::debug!("Swap panel closed before quote #{} arrived", request.seq);
            }
        });
    };

    let dispatch = move |action: SwapAction| {
        run_quote(form.try_update(|f| f.dispatch(action)).flatten());
    };

    let refresh_balance = move |token: Token| {
        spawn_local(async move {
            if let Some(balance) = wallet.fetch_balance(&token).await {
                form.try_update(|f| {
                    f.dispatch(SwapAction::UpdateTokenBalance {
                        address: token.address,
                        balance,
                    });
                });
            }
        });
    };

    let refresh_pair = move || {
        let Some(pair) = form.try_with_untracked(|f| {
            f.from_token.iter().chain(f.to_token.iter()).cloned().collect::<Vec<Token>>()
        }) else {
            return;
        };
        pair.into_iter().for_each(refresh_balance);
    };

    // New chain: default pair and token list
    Effect::new(move |_| {
        let Some(key) = settings.active_key.get() else {
            return;
        };
        let tokens = settings.token_list.get_untracked();
        let defaults = ChainTokens::from(Chain::by_key(key)).with_tokens(tokens);
        dispatch(SwapAction::ChainChanged(defaults));
    });

    // Imports and balance refreshes elsewhere
    Effect::new(move |_| {
        let tokens = settings.token_list.get();
        dispatch(SwapAction::SetTokenList(tokens));
    });

    // Balances follow the selected pair and the connected account
    let pair_addresses = Memo::new(move |_| {
        form.with(|f| {
            (
                f.from_token.as_ref().map(|t| t.address),
                f.to_token.as_ref().map(|t| t.address),
            )
        })
    });
    Effect::new(move |_| {
        pair_addresses.track();
        if wallet.address().is_some() {
            refresh_pair();
        }
    });

    let connected = move || wallet.connection.with(|c| c.is_connected());

    let on_swap = move || {
        let request = match form.with_untracked(|f| f.swap_request()) {
            Ok(request) => request,
            Err(e) => {
                toasts.report("Swap Failed", &AppError::from(e));
                return;
            }
        };
        let (owner, chain) = match wallet.session() {
            Ok(session) => session,
            Err(e) => {
                toasts.report("Swap Failed", &e);
                return;
            }
        };

        form.update(|f| {
            f.dispatch(SwapAction::BeginSwap);
        });
        wallet.swapping.set(true);

        spawn_local(async move {
            let now_secs = (js_sys::Date::now() / 1000.0) as u64;
            match dex::execute_swap(&client(), chain, owner, &request, now_secs).await {
                Ok(receipt) => {
                    log::info!("Swap confirmed: {}", receipt.tx_hash());
                    toasts.push(swap::success_notice(&request));
                    wallet.show_submitted(chain, &receipt);
                    refresh_pair();
                }
                Err(e) => {
                    log::error!("Swap failed: {}", e);
                    toasts.push(swap::failure_notice());
                }
            }
            form.try_update(|f| {
                f.dispatch(SwapAction::ResetAmounts);
                f.dispatch(SwapAction::EndSwap);
            });
            wallet.swapping.set(false);
        });
    };

    let button_label = move || {
        if connected() {
            form.with(|f| f.button_text())
        } else {
            "Connect Wallet"
        }
    };
    let button_disabled = move || connected() && form.with(|f| f.is_swapping || !f.is_valid());

    let rate = move || {
        form.with(|f| match (&f.from_token, &f.to_token, f.rate()) {
            (Some(from), Some(to), Some(rate)) => Some(format_rate(&from.symbol, &to.symbol, &rate)),
            _ => None,
        })
    };

    view! {
        <div class="card swap-card">
            <div class="card-header">
                <h2 class="card-title">"Swap"</h2>
                <button
                    class="icon-btn"
                    title="Settings"
                    on:click=move |_| dispatch(SwapAction::ToggleSettings)
                >
                    "⚙"
                </button>
            </div>

            <Show when=move || form.with(|f| f.show_settings)>
                <SwapSettings form=form/>
            </Show>

            <AmountField
                label="From"
                amount=Signal::derive(move || form.with(|f| f.from_amount.clone()))
                token=Signal::derive(move || form.with(|f| f.from_token.clone()))
                on_input=Callback::new(move |value: String| dispatch(SwapAction::SetFromAmount(value)))
                on_pick=Callback::new(move |_| picker.set(Some(Side::From)))
                on_max=Callback::new(move |_| dispatch(SwapAction::SetMax))
            />

            <div class="switch-row">
                <button class="icon-btn switch-btn" on:click=move |_| dispatch(SwapAction::SwitchTokens)>
                    "⇅"
                </button>
            </div>

            <AmountField
                label="To"
                amount=Signal::derive(move || form.with(|f| f.to_amount.clone()))
                token=Signal::derive(move || form.with(|f| f.to_token.clone()))
                on_input=Callback::new(move |value: String| dispatch(SwapAction::SetToAmount(value)))
                on_pick=Callback::new(move |_| picker.set(Some(Side::To)))
            />

            {move || rate().map(|rate| view! { <div class="info-row rate-row">{rate}</div> })}

            <div class="info-row">
                <span class="muted">"Slippage tolerance"</span>
                <span>{move || format_percentage(form.with(|f| f.slippage))}</span>
            </div>
            <div class="info-row">
                <span class="muted">"Deadline"</span>
                <span>{move || format!("{} minutes", form.with(|f| f.deadline_minutes))}</span>
            </div>

            <button
                class="btn btn-primary btn-block"
                disabled=button_disabled
                on:click=move |_| if connected() { on_swap() } else { wallet.connect() }
            >
                {button_label}
            </button>

            <Show when=move || picker.get().is_some()>
                <TokenSelector
                    tokens=settings.token_list
                    exclude=Signal::derive(move || {
                        let side = picker.get();
                        form.with(|f| {
                            let other = match side {
                                Some(Side::From) => &f.to_token,
                                _ => &f.from_token,
                            };
                            other.as_ref().map(|t| t.address)
                        })
                    })
                    on_select=Callback::new(move |token: Token| {
                        let action = match picker.get_untracked() {
                            Some(Side::To) => SwapAction::SetToToken(token),
                            _ => SwapAction::SetFromToken(token),
                        };
                        dispatch(action);
                    })
                    on_close=Callback::new(move |_| picker.set(None))
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::reactive::owner::Owner;
    use shared::chains::ChainKey;

    #[test]
    fn test_quote_lands_while_mounted() {
        let owner = Owner::new();
        let form = owner.with(|| RwSignal::new(SwapForm::default()));
        form.update(|f| {
            f.dispatch(SwapAction::ChainChanged(Chain::by_key(ChainKey::Base).into()));
        });
        let request = form
            .try_update(|f| f.dispatch(SwapAction::SetFromAmount("1".into())))
            .flatten()
            .unwrap();

        assert_eq!(latest_quote_seq(form), Some(request.seq));
        assert!(deliver_quote(form, &request, Some("2500".into())));
        assert_eq!(form.with_untracked(|f| f.to_amount.clone()), "2500.0000000000");
    }

    #[test]
    fn test_quote_after_unmount_is_dropped() {
        let owner = Owner::new();
        let form = owner.with(|| RwSignal::new(SwapForm::default()));
        let request = form
            .try_update(|f| {
                f.dispatch(SwapAction::ChainChanged(Chain::by_key(ChainKey::Base).into()));
                f.dispatch(SwapAction::SetFromAmount("1".into()))
            })
            .flatten()
            .unwrap();

        // Navigating away disposes the panel while the quote is in flight
        drop(owner);

        assert_eq!(latest_quote_seq(form), None);
        assert!(!deliver_quote(form, &request, Some("2500".into())));
        assert!(form.try_update(|f| f.dispatch(SwapAction::EndSwap)).is_none());
    }
}
