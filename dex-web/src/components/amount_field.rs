use leptos::prelude::*;
use shared::dto::Token;

use super::TokenButton;
use crate::utils::format::format_balance;

/// Amount input with its token button and the cached balance.
#[component]
pub fn AmountField(
    label: &'static str,
    #[prop(into)] amount: Signal<String>,
    #[prop(into)] token: Signal<Option<Token>>,
    on_input: Callback<String>,
    on_pick: Callback<()>,
    #[prop(optional)] on_max: Option<Callback<()>>,
) -> impl IntoView {
    let balance = move || {
        token.with(|token| {
            token
                .as_ref()
                .map(|t| format!("Balance: {}", format_balance(&t.balance)))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="amount-field">
            <div class="field-header">
                <span class="muted">{label}</span>
                <span class="muted">{balance}</span>
                {on_max.map(|on_max| view! {
                    <button class="link-btn" on:click=move |_| on_max.run(())>"MAX"</button>
                })}
            </div>
            <div class="field-body">
                <input
                    class="amount-input"
                    type="text"
                    inputmode="decimal"
                    placeholder="0.0"
                    prop:value=move || amount.get()
                    on:input=move |ev| on_input.run(event_target_value(&ev))
                />
                <TokenButton token=token on_click=on_pick/>
            </div>
        </div>
    }
}
