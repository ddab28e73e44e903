use crate::domain::a001_ir_log::ui::list::IrLogList;
use crate::shared::config::ClientConfig;
use crate::shared::notify::{ToastHost, ToastService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::load();

    // Toasts are shared by every view that reports outcomes.
    provide_context(ToastService::new(config.toast_ttl_ms));
    provide_context(config);

    view! {
        <IrLogList />
        <ToastHost />
    }
}
