use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav class="navbar">
            <A href="/swap"><span class="nav-link">"Swap"</span></A>
            <A href="/send"><span class="nav-link">"Send"</span></A>
            <A href="/limit"><span class="nav-link">"Limit"</span></A>
        </nav>
    }
}
