use crate::domain::a001_ir_log::session::EditSession;
use crate::shared::icons::icon;
use contracts::domain::a001_ir_log::{validate_name, IrLog};
use leptos::prelude::*;
use std::rc::Rc;

/// Editor for one log's working copy.
///
/// Reports every user change to the session (`mark_dirty`) together with the
/// validity of the new value; the session never diffs values itself.
#[component]
pub fn IrLogDetails(
    working: IrLog,
    session: StoredValue<Rc<EditSession>, LocalStorage>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let name = RwSignal::new(working.name.clone());
    let dirty = RwSignal::new(false);
    let saving = RwSignal::new(false);

    let validation_error = move || validate_name(&name.get()).err();

    let handle_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        match session.with_value(|s| s.rename(&value)) {
            Ok(()) => {
                name.set(value);
                dirty.set(true);
            }
            Err(e) => {
                log::debug!("input ignored: {}", e);
                // Put the field back to what the working copy holds.
                name.set(name.get_untracked());
            }
        }
    };

    let handle_save = move |_| {
        let session = session.get_value();
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = session.commit().await;
            // Gone already when the commit closed the editor.
            let _ = saving.try_set(false);
            if let Err(e) = result {
                log::debug!("commit not completed: {}", e);
            }
        });
    };

    let pulses = match working.data_values() {
        Ok(values) => values.len().to_string(),
        Err(_) => "-".to_string(),
    };

    view! {
        <div class="details-container irlog-details">
            <div class="details-form">
                <div class="form-group">
                    <label for="name">{"Name"}</label>
                    <input
                        type="text"
                        id="name"
                        required=true
                        prop:value=move || name.get()
                        on:input=handle_input
                        disabled=move || saving.get()
                        placeholder="e.g. tv power"
                    />
                    {move || validation_error().map(|e| view! { <div class="error">{e}</div> })}
                </div>

                <dl class="details-fields">
                    <dt>{"Format"}</dt>
                    <dd>{working.format.clone()}</dd>
                    <dt>{"Frequency"}</dt>
                    <dd>{format!("{} kHz", working.freq)}</dd>
                    <dt>{"Pulses"}</dt>
                    <dd>{pulses}</dd>
                    <dt>{"Host"}</dt>
                    <dd>{working.hostname.clone()}</dd>
                    <dt>{"Device"}</dt>
                    <dd>{working.deviceid.clone()}</dd>
                    <dt>{"Captured"}</dt>
                    <dd>{working.created_at_display()}</dd>
                </dl>
            </div>

            <div class="details-actions">
                {move || dirty.get().then(|| view! { <span class="details-dirty">{"Unsaved changes"}</span> })}
                <button
                    class="button button--primary"
                    on:click=handle_save
                    disabled=move || saving.get() || validation_error().is_some()
                >
                    {icon("save")}
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
                <button
                    class="button button--secondary"
                    on:click=move |_| on_cancel.run(())
                >
                    {icon("cancel")}
                    {"Cancel"}
                </button>
            </div>
        </div>
    }
}
