use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <div class="card not-found">
                <h1>"404"</h1>
                <p class="muted">"Page not found"</p>
                <A href="/">
                    <span class="btn btn-primary">"Back to swap"</span>
                </A>
            </div>
        </div>
    }
}
