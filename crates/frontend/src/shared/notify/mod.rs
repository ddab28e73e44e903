//! User-facing notifications (toasts)
//!
//! Notifications are fire-and-forget: they never fail and return nothing.
//! Messages are not de-duplicated; each one expires on its own timer.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

/// Reports the outcome of an operation to the user
pub trait NotificationSink {
    fn success(&self, message: &str);
    fn failure(&self, message: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Failure => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug)]
struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

/// Toast queue rendered by `ToastHost`.
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
    ttl_ms: u32,
}

impl ToastService {
    pub fn new(ttl_ms: u32) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
            ttl_ms,
        }
    }

    pub fn push(&self, kind: ToastKind, message: &str) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.toasts.update(|t| {
            t.push(Toast {
                id,
                kind,
                message: message.to_string(),
            })
        });

        let svc = *self;
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(svc.ttl_ms).await;
            svc.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        // The host may already be gone when a timer fires.
        let _ = self.toasts.try_update(|t| t.retain(|toast| toast.id != id));
    }
}

impl NotificationSink for ToastService {
    fn success(&self, message: &str) {
        log::info!("{}", message);
        self.push(ToastKind::Success, message);
    }

    fn failure(&self, message: &str) {
        log::warn!("{}", message);
        self.push(ToastKind::Failure, message);
    }
}

/// Renders active toasts. Must be mounted exactly once.
#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_context::<ToastService>()
        .expect("ToastService not provided in context (provide it in app root)");

    view! {
        <div class="toast-container">
            <For
                each=move || svc.toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| svc.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
