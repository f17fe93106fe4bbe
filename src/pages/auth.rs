use leptos::*;
use crate::firebase;
use crate::types::AppView;
use crate::types::AuthSession;

#[component]
pub fn Login(set_view: WriteSignal<AppView>, set_auth: WriteSignal<Option<AuthSession>>) -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (loading, set_loading) = create_signal(false);

    let do_login = move |_| {
        let email = email.get();
        let password = password.get();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match firebase::sign_in(&email, &password).await {
                Ok(session) => {
                    set_auth.set(Some(session));
                    set_view.set(AppView::Home);
                }
                Err(e) => {
                    set_error.set(Some(e));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-logo">"AlFallo"<span class="logo-accent">"Fit"</span></div>
            <p class="auth-tagline">"Elite Training Journal"</p>
            <div class="auth-card">
                <h2 class="auth-title">"Iniciar sesión"</h2>

                {move || error.get().map(|e| view! { <div class="auth-error">{e}</div> })}

                <input
                    type="email"
                    class="auth-input"
                    placeholder="Email"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                />

                <input
                    type="password"
                    class="auth-input"
                    placeholder="Contraseña"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                />

                <button
                    class="auth-button"
                    on:click=do_login
                    disabled=move || loading.get()
                >
                    {move || if loading.get() { "Entrando..." } else { "Entrar" }}
                </button>

                <div class="auth-switch">
                    "¿Sin cuenta? "
                    <button class="auth-link" on:click=move |_| set_view.set(AppView::Register)>
                        "Registrate"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn Register(set_view: WriteSignal<AppView>, set_auth: WriteSignal<Option<AuthSession>>) -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (password2, set_password2) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (loading, set_loading) = create_signal(false);

    let do_register = move |_| {
        let email = email.get();
        let password = password.get();
        let password2 = password2.get();

        if password != password2 {
            set_error.set(Some("Las contraseñas no coinciden".into()));
            return;
        }

        if password.len() < 6 {
            set_error.set(Some("La contraseña debe tener al menos 6 caracteres".into()));
            return;
        }

        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match firebase::sign_up(&email, &password).await {
                Ok(session) => {
                    set_auth.set(Some(session));
                    set_view.set(AppView::Home);
                }
                Err(e) => {
                    set_error.set(Some(e));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-logo">"AlFallo"<span class="logo-accent">"Fit"</span></div>
            <div class="auth-card">
                <h2 class="auth-title">"Crear cuenta"</h2>

                {move || error.get().map(|e| view! { <div class="auth-error">{e}</div> })}

                <input
                    type="email"
                    class="auth-input"
                    placeholder="Email"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                />

                <input
                    type="password"
                    class="auth-input"
                    placeholder="Contraseña"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                />

                <input
                    type="password"
                    class="auth-input"
                    placeholder="Confirmar contraseña"
                    on:input=move |ev| set_password2.set(event_target_value(&ev))
                    prop:value=password2
                />

                <button
                    class="auth-button"
                    on:click=do_register
                    disabled=move || loading.get()
                >
                    {move || if loading.get() { "Creando cuenta..." } else { "Crear cuenta" }}
                </button>

                <div class="auth-switch">
                    "¿Ya tenés cuenta? "
                    <button class="auth-link" on:click=move |_| set_view.set(AppView::Login)>
                        "Iniciar sesión"
                    </button>
                </div>
            </div>
        </div>
    }
}
