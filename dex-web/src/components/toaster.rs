use leptos::prelude::*;
use shared::NotificationKind;

use crate::state::use_toast_context;

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toast_context();

    view! {
        <div class="toaster">
            <For
                each=move || toasts.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let kind = match toast.notification.kind {
                        NotificationKind::Info => "toast toast-info",
                        NotificationKind::Success => "toast toast-success",
                        NotificationKind::Destructive => "toast toast-destructive",
                    };
                    view! {
                        <div class=kind role="status">
                            <div class="toast-body">
                                <strong>{toast.notification.title}</strong>
                                <p>{toast.notification.description}</p>
                            </div>
                            <button class="icon-btn" on:click=move |_| toasts.dismiss(id)>"✕"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
