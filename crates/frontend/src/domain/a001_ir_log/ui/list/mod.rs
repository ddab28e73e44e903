use crate::domain::a001_ir_log::api::{HttpLogGateway, LogGateway};
use crate::domain::a001_ir_log::overlay::ModalOverlay;
use crate::domain::a001_ir_log::session::EditSession;
use crate::domain::a001_ir_log::store::LogStore;
use crate::domain::a001_ir_log::ui::details::IrLogDetails;
use crate::shared::config::ClientConfig;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::notify::{NotificationSink, ToastService};
use contracts::domain::a001_ir_log::{IrLog, IrLogId};
use leptos::prelude::*;
use std::rc::Rc;

#[component]
#[allow(non_snake_case)]
pub fn IrLogList() -> impl IntoView {
    let config = use_context::<ClientConfig>().expect("ClientConfig not found in context");
    let toasts = use_context::<ToastService>().expect("ToastService not found in context");
    let overlay = ModalOverlay::new();

    let gateway: Rc<dyn LogGateway> = Rc::new(HttpLogGateway::new(config.api_base));
    let notifier: Rc<dyn NotificationSink> = Rc::new(toasts);
    let store = Rc::new(LogStore::new(gateway.clone(), notifier.clone()));
    let session = Rc::new(EditSession::new(
        store.clone(),
        gateway,
        notifier,
        Rc::new(overlay),
    ));

    let (items, set_items) = signal::<Vec<IrLog>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    store.subscribe(move |records| {
        let _ = set_items.try_set(records.to_vec());
    });

    let store = StoredValue::new_local(store);
    let session = StoredValue::new_local(session);

    // Failed loads keep the last good list; the banner is informational only.
    let fetch = move || {
        let store = store.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            match store.load().await {
                Ok(_) => {
                    let _ = set_error.try_set(None);
                }
                Err(e) => {
                    let _ = set_error.try_set(Some(format!("Failed to load logs: {}", e)));
                }
            }
        });
    };

    let post = move |id: IrLogId| {
        let store = store.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = store.send_action(id).await;
        });
    };

    let handle_edit = move |id: IrLogId| {
        if let Err(e) = session.with_value(|s| s.open_by_id(id)) {
            log::debug!("editor for log {} not opened: {}", id, e);
        }
    };

    // Single `closed` per show/hide cycle, whatever dismissed the editor.
    let on_dismiss = Callback::new(move |_| {
        if overlay.take_closed() {
            session.with_value(|s| s.close());
        }
    });

    fetch();

    view! {
        <div class="content">
            <div class="header">
                <h2>{"IR Logs"}</h2>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Refresh"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="table-container">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"#"}</th>
                            <th class="table__header-cell">{"Name"}</th>
                            <th class="table__header-cell">{"Format"}</th>
                            <th class="table__header-cell">{"Freq"}</th>
                            <th class="table__header-cell">{"Host"}</th>
                            <th class="table__header-cell">{"Captured"}</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || items.get().into_iter().map(|row| {
                            let id = row.id;
                            view! {
                                <tr class="table__row" on:click=move |_| handle_edit(id)>
                                    <td class="table__cell">{id.to_string()}</td>
                                    <td class="table__cell">{row.display_name()}</td>
                                    <td class="table__cell">{row.format.clone()}</td>
                                    <td class="table__cell">{row.freq}</td>
                                    <td class="table__cell">{row.hostname.clone()}</td>
                                    <td class="table__cell">{row.created_at_display()}</td>
                                    <td class="table__cell">
                                        <button
                                            class="button button--primary"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                post(id);
                                            }
                                        >
                                            {icon("send")}
                                            {"Post"}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            {move || overlay.editing().map(|working| view! {
                <Modal title=format!("Log #{}", working.id) on_close=on_dismiss>
                    <IrLogDetails working=working session=session on_cancel=on_dismiss />
                </Modal>
            })}
        </div>
    }
}
