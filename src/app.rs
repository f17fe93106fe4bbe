use leptos::*;

use crate::firebase;
use crate::pages::{Dashboard, Login, Onboarding, Register};
use crate::sheets::{self, RoutineLoad};
use crate::types::{AppView, AuthSession};

/// Selector order (Monday first); the default selection still follows the
/// calendar weekday.
pub const WEEK_DAYS: [&str; 7] = [
    "Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo",
];

// getDay() numbering, Sunday = 0.
const JS_WEEK_DAYS: [&str; 7] = [
    "Domingo", "Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado",
];

pub fn current_weekday() -> &'static str {
    let idx = js_sys::Date::new_0().get_day() as usize;
    JS_WEEK_DAYS.get(idx).copied().unwrap_or("Lunes")
}

/// Calendar-day marker used to expire per-exercise state overnight.
pub fn today_string() -> String {
    String::from(js_sys::Date::new_0().to_date_string())
}

pub fn format_elapsed(secs: i64) -> String {
    let hrs = secs / 3600;
    let mins = (secs % 3600) / 60;
    let s = secs % 60;
    if hrs > 0 {
        format!("{}:{:02}:{:02}", hrs, mins, s)
    } else {
        format!("{:02}:{:02}", mins, s)
    }
}

pub fn format_countdown(secs: i32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[component]
pub fn App() -> impl IntoView {
    let initial_view = if firebase::load_auth_session().is_some() {
        AppView::Home
    } else {
        AppView::Login
    };

    let (view, set_view) = create_signal(initial_view);
    let (auth, set_auth) = create_signal(firebase::load_auth_session());

    view! {
        <div class="app">
            {move || match view.get() {
                AppView::Login => view! { <Login set_view=set_view set_auth=set_auth /> }.into_view(),
                AppView::Register => view! { <Register set_view=set_view set_auth=set_auth /> }.into_view(),
                AppView::Home => view! { <Home auth=auth set_view=set_view set_auth=set_auth /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn Home(
    auth: ReadSignal<Option<AuthSession>>,
    set_view: WriteSignal<AppView>,
    set_auth: WriteSignal<Option<AuthSession>>,
) -> impl IntoView {
    let Some(session) = auth.get_untracked() else {
        set_view.set(AppView::Login);
        return view! { <div class="loading-screen">"Sesión expirada..."</div> }.into_view();
    };
    let session = store_value(session);

    let (load, set_load) = create_signal(Option::<RoutineLoad>::None);

    create_effect(move |_| {
        let session = session.get_value();
        spawn_local(async move {
            set_load.set(Some(sheets::load_routine(&session).await));
        });
    });

    let logout = move |_| {
        firebase::sign_out();
        set_auth.set(None);
        set_view.set(AppView::Login);
    };

    view! {
        <div class="home">
            <header class="app-header">
                <h1 class="logo">"AlFallo"<span class="logo-accent">"Fit"</span></h1>
                <button class="avatar-btn" on:click=logout title="Cerrar sesión">
                    {move || {
                        let user = session.get_value().user;
                        match user.photo_url.clone() {
                            Some(url) => view! { <img class="avatar" src=url alt="perfil" /> }.into_view(),
                            None => {
                                let initial = user
                                    .first_name()
                                    .chars()
                                    .next()
                                    .map(|c| c.to_uppercase().to_string())
                                    .unwrap_or_default();
                                view! { <span class="avatar-fallback">{initial}</span> }.into_view()
                            }
                        }
                    }}
                </button>
            </header>

            <main class="app-main">
                {move || match load.get() {
                    None => view! {
                        <div class="loading-screen">
                            <div class="spinner"></div>
                            <p class="loading-text">"Sincronizando Hierro..."</p>
                        </div>
                    }.into_view(),
                    Some(RoutineLoad::NeedsSheetId) => view! {
                        <Onboarding session=session.get_value() />
                    }.into_view(),
                    Some(RoutineLoad::Ready(routine)) => view! {
                        <Dashboard routine=routine session=session.get_value() />
                    }.into_view(),
                }}
            </main>
        </div>
    }
    .into_view()
}
