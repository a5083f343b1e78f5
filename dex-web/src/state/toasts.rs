use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shared::Notification;

use crate::config::app_config;
use crate::error::AppError;

/// Oldest toasts are dropped past this many.
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    pub toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Show a toast and schedule its dismissal.
    pub fn push(&self, notification: Notification) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        let duration = notification.duration_ms.unwrap_or(app_config().toast_ms);
        self.toasts.update(|list| {
            list.push(Toast { id, notification });
            if list.len() > MAX_TOASTS {
                list.remove(0);
            }
        });

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(duration).await;
            ctx.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|toast| toast.id != id));
    }

    /// Log `error` and surface it as a destructive toast.
    pub fn report(&self, title: &str, error: &AppError) {
        log::error!("{}: {}", title, error);
        self.push(Notification::destructive(title, error.user_message()));
    }
}

pub fn provide_toast_context() -> ToastContext {
    let ctx = ToastContext::new();
    provide_context(ctx);
    ctx
}

pub fn use_toast_context() -> ToastContext {
    expect_context::<ToastContext>()
}
