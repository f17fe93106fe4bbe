use leptos::*;

use crate::app::{current_weekday, format_elapsed, WEEK_DAYS};
use crate::pages::ExerciseCard;
use crate::routine::{self, normalize_header};
use crate::storage::{self, KvStore, LocalStore};
use crate::types::{AuthSession, ExerciseRecord};

/// Session shell: day selection, the training-in-progress flag with its
/// persisted start timestamp (elapsed time survives a reload), and the
/// end-of-session summary that wipes all per-exercise state.
#[component]
pub fn Dashboard(routine: Vec<ExerciseRecord>, session: AuthSession) -> impl IntoView {
    let routine = store_value(routine);
    let session = store_value(session);

    let store = LocalStore::new();
    let (selected_day, set_selected_day) = create_signal(current_weekday().to_string());
    let (is_training, set_is_training) =
        create_signal(store.get(storage::TRAINING_FLAG_KEY).as_deref() == Some("true"));
    let (start_time, set_start_time) =
        create_signal(store.get(storage::START_TIME_KEY).and_then(|v| v.parse::<i64>().ok()));
    let (elapsed, set_elapsed) = create_signal(0i64);
    let (show_summary, set_show_summary) = create_signal(false);

    create_effect(move |_| {
        let handle = gloo_timers::callback::Interval::new(1000, move || {
            if is_training.get() {
                if let Some(start) = start_time.get() {
                    let now = js_sys::Date::now() as i64;
                    set_elapsed.set(((now - start) / 1000).max(0));
                }
            }
        });
        on_cleanup(move || drop(handle));
    });

    let daily = create_memo(move |_| {
        let wanted = normalize_header(&selected_day.get());
        routine.with_value(|r| {
            r.iter()
                .filter(|ex| normalize_header(&ex.day) == wanted)
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let is_rest_day = move || routine::is_rest_day(&daily.get());

    let start_training = move |_| {
        let now = js_sys::Date::now() as i64;
        let store = LocalStore::new();
        store.set(storage::TRAINING_FLAG_KEY, "true");
        store.set(storage::START_TIME_KEY, &now.to_string());
        set_start_time.set(Some(now));
        set_elapsed.set(0);
        set_is_training.set(true);
    };

    // Wipes every exercise's per-day state, not just today's, then reloads
    // so the whole app starts from defaults.
    let close_session = move |_| {
        storage::clear_session_state(&LocalStore::new());
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    view! {
        <div class="dashboard">
            {move || (!is_training.get()).then(|| view! {
                <div class="day-selector">
                    {WEEK_DAYS.iter().map(|day| {
                        let day = *day;
                        let btn_class = move || {
                            if selected_day.get() == day { "day-btn selected" } else { "day-btn" }
                        };
                        view! {
                            <button class=btn_class on:click=move |_| set_selected_day.set(day.to_string())>
                                {day}
                            </button>
                        }
                    }).collect_view()}
                </div>
            })}

            <div class="dashboard-header">
                <div>
                    <p class="dashboard-day">{move || selected_day.get()}</p>
                    <h2 class="dashboard-title">
                        {move || if is_rest_day() {
                            "Recuperación"
                        } else if is_training.get() {
                            "En Sesión"
                        } else {
                            "Tu Rutina"
                        }}
                    </h2>
                </div>
                {move || (is_training.get() && !is_rest_day()).then(|| view! {
                    <div class="elapsed-box">
                        <p class="elapsed-label">"Tiempo Total"</p>
                        <p class="elapsed-value">{move || format_elapsed(elapsed.get())}</p>
                    </div>
                })}
            </div>

            {move || {
                if is_rest_day() {
                    view! {
                        <div class="rest-day-card">
                            <span class="rest-day-icon">"🧘‍♂️"</span>
                            <h3 class="rest-day-title">"Hoy se descansa"</h3>
                            <p class="rest-day-sub">"Recuperación Total"</p>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div>
                            {move || (!is_training.get()).then(|| view! {
                                <button class="start-training-btn" on:click=start_training>
                                    "Iniciar Entrenamiento"
                                </button>
                            })}
                            <div class="exercise-list">
                                {move || daily.get().into_iter().map(|ex| view! {
                                    <ExerciseCard
                                        record=ex
                                        is_training=is_training
                                        session=session.get_value()
                                    />
                                }).collect_view()}
                            </div>
                            {move || is_training.get().then(|| view! {
                                <button class="end-training-btn" on:click=move |_| set_show_summary.set(true)>
                                    "Finalizar Entrenamiento"
                                </button>
                            })}
                        </div>
                    }.into_view()
                }
            }}

            {move || show_summary.get().then(|| view! {
                <div class="modal-overlay">
                    <div class="summary-dialog">
                        <h2 class="summary-title">"¡Sesión Terminada!"</h2>
                        <p class="summary-label">"Tiempo de Trabajo"</p>
                        <p class="summary-time">{format_elapsed(elapsed.get())}</p>
                        <button class="summary-close-btn" on:click=close_session>
                            "Guardar y Salir"
                        </button>
                    </div>
                </div>
            })}
        </div>
    }
}
