use leptos::prelude::*;
use shared::dto::Token;

/// Round avatar with the token's initial.
#[component]
pub fn TokenImage(#[prop(into)] symbol: String) -> impl IntoView {
    let initial = symbol.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();

    view! {
        <span class="token-image" title=symbol>
            {initial}
        </span>
    }
}

/// Token picker trigger: the selected token, or a "Select token" prompt.
#[component]
pub fn TokenButton(#[prop(into)] token: Signal<Option<Token>>, on_click: Callback<()>) -> impl IntoView {
    view! {
        <button class="token-btn" on:click=move |_| on_click.run(())>
            {move || match token.get() {
                Some(token) => view! {
                    <TokenImage symbol=token.symbol.clone()/>
                    <span class="token-symbol">{token.symbol}</span>
                }
                .into_any(),
                None => view! { <span>"Select token"</span> }.into_any(),
            }}
            <span class="chevron">"▾"</span>
        </button>
    }
}
