use leptos::prelude::*;

use crate::components::{LimitOrder, SendToken, SwapCard};
use crate::utils::constants::{APP_NAME, APP_TAGLINE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Swap,
    Send,
}

/// Landing page: swap and send behind one tab strip.
#[component]
pub fn IndexPage() -> impl IntoView {
    let tab = RwSignal::new(Tab::Swap);

    view! {
        <div class="page">
            <div class="hero">
                <h1>{APP_NAME}</h1>
                <p class="muted">{APP_TAGLINE}</p>
            </div>
            <div class="tabs">
                <button class="tab" class:active=move || tab.get() == Tab::Swap on:click=move |_| tab.set(Tab::Swap)>
                    "Swap"
                </button>
                <button class="tab" class:active=move || tab.get() == Tab::Send on:click=move |_| tab.set(Tab::Send)>
                    "Send"
                </button>
            </div>
            {move || match tab.get() {
                Tab::Swap => view! { <SwapCard/> }.into_any(),
                Tab::Send => view! { <SendToken/> }.into_any(),
            }}
        </div>
    }
}

#[component]
pub fn SwapPage() -> impl IntoView {
    view! { <div class="page"><SwapCard/></div> }
}

#[component]
pub fn SendPage() -> impl IntoView {
    view! { <div class="page"><SendToken/></div> }
}

#[component]
pub fn LimitPage() -> impl IntoView {
    view! { <div class="page"><LimitOrder/></div> }
}
