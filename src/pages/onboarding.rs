use leptos::*;
use crate::firebase;
use crate::types::AuthSession;

/// First-run screen: link the user's spreadsheet by id. A successful save
/// reloads the page so the whole load flow re-runs against the new id.
#[component]
pub fn Onboarding(session: AuthSession) -> impl IntoView {
    let session = store_value(session);

    let (sheet_id, set_sheet_id) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (saving, set_saving) = create_signal(false);

    let link_sheet = move |_| {
        let id = sheet_id.get().trim().to_string();
        if id.is_empty() {
            return;
        }
        set_saving.set(true);
        set_error.set(None);

        let session = session.get_value();
        spawn_local(async move {
            match firebase::save_sheet_id(&session, &id).await {
                Ok(()) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().reload();
                    }
                }
                Err(e) => {
                    web_sys::console::log_1(&format!("Sheet id save failed: {:?}", e).into());
                    set_error.set(Some("No se pudo guardar el ID de la planilla".into()));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="onboarding">
            <h2 class="onboarding-title">"Configurá tu planilla"</h2>
            <p class="onboarding-text">
                "Pegá el ID de tu Google Sheet para vincular tu rutina personal."
            </p>

            {move || error.get().map(|e| view! { <div class="auth-error">{e}</div> })}

            <input
                type="text"
                class="onboarding-input"
                placeholder="ID de la planilla"
                on:input=move |ev| set_sheet_id.set(event_target_value(&ev))
                prop:value=sheet_id
            />

            <button
                class="onboarding-button"
                on:click=link_sheet
                disabled=move || saving.get()
            >
                {move || if saving.get() { "Vinculando..." } else { "Vincular rutina" }}
            </button>
        </div>
    }
}
