use leptos::*;
use web_sys::{HtmlAudioElement, Notification, NotificationOptions, NotificationPermission};

use crate::app::{format_countdown, today_string};
use crate::firebase;
use crate::session::{ExerciseSession, SessionPhase};
use crate::storage::LocalStore;
use crate::timer::RestTimer;
use crate::types::{AuthSession, ExerciseRecord, LoggedSet};

/// One card per exercise of the selected day. Owns the per-day session state
/// machine and the rest countdown; every saved set goes to the document
/// store fire-and-forget and restarts the countdown.
#[component]
pub fn ExerciseCard(
    record: ExerciseRecord,
    is_training: ReadSignal<bool>,
    session: AuthSession,
) -> impl IntoView {
    let today = today_string();
    let (ex_session, set_ex_session) = create_signal(ExerciseSession::load(
        &LocalStore::new(),
        &record.day,
        &record.name,
        &today,
    ));

    let name = record.name.clone();
    let target_chip = record.target.clone();
    let weight_chip = record.preset_weight.clone();
    let notes = record.notes.clone();
    let rest_preset = record.rest_seconds();
    let target_series = record.target_series();
    let first_name = session.user.first_name().to_string();

    let record = store_value(record);
    let auth = store_value(session);
    let today = store_value(today);

    let (weight, set_weight) = create_signal(weight_chip.clone());
    let (show_modal, set_show_modal) = create_signal(false);
    let (current_reps, set_current_reps) = create_signal(String::new());
    let (current_rpe, set_current_rpe) = create_signal(8u8);

    let (timer, set_timer) = create_signal(RestTimer::new());
    let (alarm_playing, set_alarm_playing) = create_signal(false);
    let audio = store_value(HtmlAudioElement::new_with_src("/finish.wav").ok());

    let silence_alarm = move || {
        audio.with_value(|audio| {
            if let Some(audio) = audio {
                let _ = audio.pause();
                audio.set_current_time(0.0);
            }
        });
        set_alarm_playing.set(false);
    };

    // Expiry alert: vibration pulse, system notification naming the
    // exercise, looping audio cue with a 10 s auto-silence.
    let fire_alert = move || {
        if let Some(window) = web_sys::window() {
            let pattern = js_sys::Array::new();
            for ms in [400.0, 200.0, 400.0] {
                pattern.push(&ms.into());
            }
            let _ = window.navigator().vibrate_with_pattern(&pattern);
        }

        if Notification::permission() == NotificationPermission::Granted {
            let body = format!(
                "{}, a darle al {}",
                auth.with_value(|s| s.user.first_name().to_string()),
                record.with_value(|r| r.name.clone())
            );
            let options = NotificationOptions::new();
            options.set_body(&body);
            options.set_icon("/logo192.png");
            options.set_require_interaction(true);
            let _ = Notification::new_with_options("¡TIEMPO CUMPLIDO!", &options);
        }

        audio.with_value(|audio| {
            if let Some(audio) = audio {
                audio.set_loop(true);
                let _ = audio.play();
            }
        });
        set_alarm_playing.set(true);

        gloo_timers::callback::Timeout::new(10_000, move || silence_alarm()).forget();
    };

    create_effect(move |_| {
        let handle = gloo_timers::callback::Interval::new(1000, move || {
            let mut expired = false;
            set_timer.update(|t| expired = t.tick());
            if expired {
                fire_alert();
            }
        });
        on_cleanup(move || drop(handle));
    });

    let open_modal = move |_| {
        set_current_reps.set(record.with_value(|r| r.suggested_reps()));
        set_show_modal.set(true);
    };

    let save_set = move |_| {
        let Ok(reps) = current_reps.get().trim().parse::<u32>() else {
            return;
        };
        let set = LoggedSet {
            reps,
            rpe: current_rpe.get(),
            weight: weight.get(),
        };

        // Remote write first, fire and forget; the local log below is the
        // in-session source of truth either way.
        let auth_session = auth.get_value();
        record.with_value(|r| firebase::log_set_to_cloud(&auth_session, &r.name, &set));

        let store = LocalStore::new();
        let day_marker = today.get_value();
        let mut appended = false;
        set_ex_session.update(|s| appended = s.log_set(&store, set, &day_marker));
        if appended {
            let rest = record.with_value(|r| r.rest_seconds());
            set_timer.update(|t| t.start(rest));
        }
        set_show_modal.set(false);
    };

    let finalize = move |_| {
        set_ex_session.update(|s| s.finalize(&LocalStore::new()));
    };

    let card_class = move || {
        if ex_session.with(|s| s.is_finalized()) {
            "exercise-card finalized"
        } else {
            "exercise-card"
        }
    };

    view! {
        <div class=card_class>
            <div class="exercise-head">
                <h3 class="exercise-name">{name}</h3>
                <div class="exercise-chips">
                    <span class="chip chip-target">"OBJ: "{target_chip}</span>
                    {(!weight_chip.is_empty()).then(|| view! {
                        <span class="chip chip-weight">{weight_chip.clone()}"KG"</span>
                    })}
                    {(!notes.is_empty()).then(|| view! {
                        <span class="chip chip-notes">{notes.clone()}</span>
                    })}
                </div>
            </div>

            {move || {
                if ex_session.with(|s| s.is_finalized()) {
                    let sets = ex_session.with(|s| s.sets().to_vec());
                    view! {
                        <div class="finalized-block">
                            <p class="finalized-msg">{format!("¡OBJETIVO CUMPLIDO, {}! 🔥", first_name)}</p>
                            <div class="set-log">
                                {sets.into_iter().enumerate().map(|(i, s)| view! {
                                    <div class="set-row">
                                        <span class="set-num">{format!("S{}", i + 1)}</span>
                                        <span class="set-detail">
                                            {format!("{}kg x {} ", s.weight, s.reps)}
                                            <span class="set-rpe">{format!("@RPE{}", s.rpe)}</span>
                                        </span>
                                    </div>
                                }).collect_view()}
                            </div>
                        </div>
                    }.into_view()
                } else if is_training.get() {
                    view! {
                        <div class="exercise-controls">
                            <div class="log-row">
                                <div class="weight-input-wrap">
                                    <span class="weight-input-label">"PESO KG"</span>
                                    <input
                                        type="number"
                                        class="weight-input"
                                        on:input=move |ev| set_weight.set(event_target_value(&ev))
                                        prop:value=weight
                                    />
                                </div>
                                <button class="log-set-btn" on:click=open_modal>
                                    {move || format!("SERIE {}", ex_session.with(|s| s.next_set_number()))}
                                </button>
                            </div>

                            {move || (timer.with(|t| t.remaining()) > 0).then(|| view! {
                                <div class="rest-panel">
                                    <button class="rest-adjust" on:click=move |_| set_timer.update(|t| t.adjust(-15))>
                                        "-15"
                                    </button>
                                    <div class="rest-center">
                                        <p class="rest-caption">{format!("Descanso: {}s", rest_preset)}</p>
                                        <span class="rest-countdown">
                                            {move || format_countdown(timer.with(|t| t.remaining()))}
                                        </span>
                                    </div>
                                    <button class="rest-adjust" on:click=move |_| set_timer.update(|t| t.adjust(15))>
                                        "+15"
                                    </button>
                                </div>
                            })}

                            {move || alarm_playing.get().then(|| view! {
                                <button class="stop-alarm-btn" on:click=move |_| silence_alarm()>
                                    "🛑 DETENER ALARMA"
                                </button>
                            })}

                            {move || {
                                let reached = ex_session.with(|s| s.target_reached(target_series));
                                if reached {
                                    view! {
                                        <button class="finalize-btn" on:click=finalize>
                                            "✓ Finalizar Ejercicio"
                                        </button>
                                    }.into_view()
                                } else if ex_session.with(|s| s.phase()) == SessionPhase::InProgress {
                                    view! {
                                        <button class="finish-early-btn" on:click=finalize>
                                            "Terminar antes →"
                                        </button>
                                    }.into_view()
                                } else {
                                    ().into_view()
                                }
                            }}
                        </div>
                    }.into_view()
                } else {
                    ().into_view()
                }
            }}

            {move || show_modal.get().then(|| view! {
                <div class="modal-overlay">
                    <div class="set-dialog">
                        <p class="set-dialog-label">"Repeticiones"</p>
                        <input
                            type="number"
                            class="reps-input"
                            autofocus=true
                            on:input=move |ev| set_current_reps.set(event_target_value(&ev))
                            prop:value=current_reps
                        />
                        <div class="rpe-row">
                            {[7u8, 8, 9, 10].into_iter().map(|n| {
                                let btn_class = move || {
                                    if current_rpe.get() == n { "rpe-btn selected" } else { "rpe-btn" }
                                };
                                view! {
                                    <button class=btn_class on:click=move |_| set_current_rpe.set(n)>
                                        {n}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                        <button class="save-set-btn" on:click=save_set>
                            "Guardar Serie"
                        </button>
                    </div>
                </div>
            })}
        </div>
    }
}
