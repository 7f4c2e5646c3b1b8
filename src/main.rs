//! Main module for the Lighthouse interval timer using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use gloo_timers::callback::Interval;
use lighthouse_timer::{
    cues::{cue_at_boundary, CueOptions},
    format_seconds, limits, Phase, Status, TimerConfig, TimerEngine, TimerSettings,
};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod audio;
mod components;
mod config;
mod storage;
mod utils;

use audio::CueAudio;
use components::{DurationInput, InstallPrompt, NumberInput, SavedConfigs};
use config::TICK_MS;
use utils::{convert_on_unit_toggle, DurationEntry, EntryUnit};

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Bump a version counter state to force a re-render after mutating the
/// engine behind its RefCell.
fn bump(version: &UseStateHandle<usize>) {
    version.set(version.wrapping_add(1));
}

/// Arm the audio cue, if any, for the upcoming tick boundary.
fn arm_next_cue(
    audio: &Rc<RefCell<CueAudio>>,
    phase: Phase,
    remaining: u32,
    options: &CueOptions,
) {
    if let Some(cue) = cue_at_boundary(phase, remaining.saturating_sub(1), options) {
        audio.borrow_mut().arm(cue);
    }
}

/// The 1 Hz tick loop. Exactly one of these is alive at a time: the handle
/// lives in component state, and replacing or clearing the state cancels the
/// previous interval before a new one can tick.
fn spawn_tick_interval(
    engine: Rc<RefCell<TimerEngine>>,
    version: UseStateHandle<usize>,
    interval: UseStateHandle<Option<Interval>>,
    audio: Rc<RefCell<CueAudio>>,
    options: Rc<RefCell<CueOptions>>,
) -> Interval {
    Interval::new(TICK_MS, move || {
        let Some(tick) = engine.borrow_mut().tick() else {
            // stray callback after pause/reset; nothing to do
            return;
        };
        if tick.transition.is_some() {
            // the boundary cue has fired by now; the new phase starts with a
            // clean schedule
            audio.borrow_mut().cancel_all();
        }
        if engine.borrow().status() == Status::Running {
            arm_next_cue(&audio, tick.phase, tick.remaining, &options.borrow());
        } else {
            audio.borrow_mut().cancel_all();
            interval.set(None);
        }
        bump(&version);
    })
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    let engine = use_mut_ref(|| TimerEngine::new(TimerSettings::default()));
    // bumped after every engine mutation; read below to trigger re-renders
    let engine_version = use_state(|| 0usize);
    let interval = use_state(|| None::<Interval>);
    let audio = use_mut_ref(CueAudio::new);

    let defaults = TimerSettings::default();
    let sets = use_state(|| defaults.sets);
    let duration = use_state(|| defaults.duration);
    let break_time = use_state(|| defaults.break_time);
    let duration_in_minutes = use_state(|| defaults.duration_in_minutes);
    let break_in_minutes = use_state(|| defaults.break_in_minutes);

    let cue_options = use_state(CueOptions::default);
    // mirror of cue_options that the long-lived tick closure can read fresh
    let options_ref = use_mut_ref(CueOptions::default);
    let show_inputs = use_state(|| true);

    // settings flow into the engine as they change; a running phase keeps
    // its countdown and the new lengths apply from the next phase start
    {
        let engine = engine.clone();
        use_effect_with(
            (
                *sets,
                *duration,
                *break_time,
                *duration_in_minutes,
                *break_in_minutes,
            ),
            move |&(sets, duration, break_time, duration_in_minutes, break_in_minutes)| {
                engine.borrow_mut().update_settings(TimerSettings {
                    sets,
                    duration,
                    break_time,
                    duration_in_minutes,
                    break_in_minutes,
                });
                || ()
            },
        );
    }

    {
        let options_ref = options_ref.clone();
        use_effect_with(*cue_options, move |options| {
            *options_ref.borrow_mut() = *options;
            || ()
        });
    }

    let toggle_timer = {
        let engine = engine.clone();
        let engine_version = engine_version.clone();
        let interval_handle = interval.clone();
        let audio = audio.clone();
        let options_ref = options_ref.clone();
        let show_inputs = show_inputs.clone();
        Callback::from(move |_| {
            let status = engine.borrow().status();
            match status {
                Status::Running => {
                    engine.borrow_mut().pause();
                    // no drift-replay: a cue cancelled here stays cancelled
                    audio.borrow_mut().cancel_all();
                    interval_handle.set(None);
                }
                Status::Idle | Status::Paused => {
                    // the first user gesture doubles as the audio unlock
                    audio.borrow_mut().unlock();
                    engine.borrow_mut().start();
                    if status == Status::Idle {
                        show_inputs.set(false);
                        let eng = engine.borrow();
                        arm_next_cue(&audio, eng.phase(), eng.remaining(), &options_ref.borrow());
                    }
                    interval_handle.set(Some(spawn_tick_interval(
                        engine.clone(),
                        engine_version.clone(),
                        interval_handle.clone(),
                        audio.clone(),
                        options_ref.clone(),
                    )));
                }
                Status::Completed => {}
            }
            bump(&engine_version);
        })
    };

    let reset_timer = {
        let engine = engine.clone();
        let engine_version = engine_version.clone();
        let interval_handle = interval.clone();
        let audio = audio.clone();
        let show_inputs = show_inputs.clone();
        Callback::from(move |_| {
            engine.borrow_mut().reset();
            audio.borrow_mut().cancel_all();
            interval_handle.set(None);
            show_inputs.set(true);
            bump(&engine_version);
        })
    };

    let on_sets_change = {
        let sets = sets.clone();
        Callback::from(move |value| sets.set(value))
    };

    let on_duration_commit = {
        let duration = duration.clone();
        let duration_in_minutes = duration_in_minutes.clone();
        Callback::from(move |entry: DurationEntry| {
            duration.set(entry.value);
            if let Some(unit) = entry.unit {
                duration_in_minutes.set(unit == EntryUnit::Minutes);
            }
        })
    };
    let on_duration_toggle = {
        let duration = duration.clone();
        let duration_in_minutes = duration_in_minutes.clone();
        Callback::from(move |_: ()| {
            duration.set(convert_on_unit_toggle(*duration, *duration_in_minutes));
            duration_in_minutes.set(!*duration_in_minutes);
        })
    };

    let on_break_commit = {
        let break_time = break_time.clone();
        let break_in_minutes = break_in_minutes.clone();
        Callback::from(move |entry: DurationEntry| {
            break_time.set(entry.value);
            if let Some(unit) = entry.unit {
                break_in_minutes.set(unit == EntryUnit::Minutes);
            }
        })
    };
    let on_break_toggle = {
        let break_time = break_time.clone();
        let break_in_minutes = break_in_minutes.clone();
        Callback::from(move |_: ()| {
            break_time.set(convert_on_unit_toggle(*break_time, *break_in_minutes));
            break_in_minutes.set(!*break_in_minutes);
        })
    };

    // applying a preset overwrites every field at once
    let on_load_config = {
        let sets = sets.clone();
        let duration = duration.clone();
        let break_time = break_time.clone();
        let duration_in_minutes = duration_in_minutes.clone();
        let break_in_minutes = break_in_minutes.clone();
        Callback::from(move |preset: TimerConfig| {
            let settings = preset.to_settings();
            sets.set(settings.sets);
            duration.set(settings.duration);
            break_time.set(settings.break_time);
            duration_in_minutes.set(settings.duration_in_minutes);
            break_in_minutes.set(settings.break_in_minutes);
        })
    };

    let toggle_warning = {
        let cue_options = cue_options.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cue_options.set(CueOptions {
                ten_second_warning: input.checked(),
                ..*cue_options
            });
        })
    };
    let toggle_countdown = {
        let cue_options = cue_options.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cue_options.set(CueOptions {
                countdown: input.checked(),
                ..*cue_options
            });
        })
    };

    let toggle_inputs = {
        let show_inputs = show_inputs.clone();
        Callback::from(move |_| show_inputs.set(!*show_inputs))
    };

    // ensure the tick loop's version bumps re-render this component
    let _ = *engine_version;
    let (status, phase, remaining, current_set, total_sets) = {
        let eng = engine.borrow();
        (
            eng.status(),
            eng.phase(),
            eng.remaining(),
            eng.current_set(),
            eng.sets(),
        )
    };
    // before the first start the display previews the configured work phase
    let display_remaining = if status == Status::Idle {
        engine.borrow().settings().work_seconds()
    } else {
        remaining
    };

    let phase_label = match (status, phase) {
        (Status::Completed, _) => "Workout complete".to_string(),
        (Status::Idle, _) => format!("Set 1/{}", total_sets),
        (_, Phase::Break) => "Break Time".to_string(),
        (_, Phase::Work) => format!("Set {}/{}", current_set, total_sets),
    };
    let start_label = if status == Status::Running {
        "PAUSE"
    } else {
        "START"
    };

    let current_settings = TimerSettings {
        sets: *sets,
        duration: *duration,
        break_time: *break_time,
        duration_in_minutes: *duration_in_minutes,
        break_in_minutes: *break_in_minutes,
    };

    html! {
        <div class="container">
            <h1>{ "LIGHTHOUSE" }</h1>

            if *show_inputs {
                <div class="inputs">
                    <div class="form-group">
                        <label>{ "Number of Sets" }</label>
                        <NumberInput
                            label="Number of sets"
                            value={*sets}
                            min={limits::MIN_SETS}
                            max={limits::MAX_SETS}
                            onchange={on_sets_change}
                        />
                    </div>
                    <div class="form-group">
                        <label>{ "Set Duration" }</label>
                        <DurationInput
                            value={*duration}
                            in_minutes={*duration_in_minutes}
                            on_commit={on_duration_commit}
                            on_toggle_unit={on_duration_toggle}
                        />
                    </div>
                    <div class="form-group">
                        <label>{ "Break Time" }</label>
                        <DurationInput
                            value={*break_time}
                            in_minutes={*break_in_minutes}
                            on_commit={on_break_commit}
                            on_toggle_unit={on_break_toggle}
                        />
                    </div>
                    <div class="form-group checkbox-group">
                        <label>
                            <input type="checkbox"
                                checked={cue_options.ten_second_warning}
                                onchange={toggle_warning}
                            />
                            { " 10-second warning beep" }
                        </label>
                        <label>
                            <input type="checkbox"
                                checked={cue_options.countdown}
                                onchange={toggle_countdown}
                            />
                            { " 3-2-1 countdown beeps" }
                        </label>
                    </div>
                </div>
            }

            <div class="time-display">
                <div class="time">{ format_seconds(display_remaining) }</div>
                <div class="phase-label">{ phase_label }</div>
            </div>

            <div class="controls">
                <button class="btn-primary" onclick={toggle_timer}>{ start_label }</button>
                <button class="btn-secondary" onclick={reset_timer}>{ "RESET" }</button>
            </div>

            if status == Status::Running || status == Status::Paused {
                <div class="inputs-toggle">
                    <button class="btn-ghost" onclick={toggle_inputs}>
                        { if *show_inputs { "Hide settings" } else { "Show settings" } }
                    </button>
                </div>
            }

            <SavedConfigs settings={current_settings} on_load={on_load_config} />
        </div>
    }
}

/// App wrapper composing the timer with the install banner.
#[function_component]
pub fn App() -> Html {
    html! {
        <>
            <Main />
            <InstallPrompt />
        </>
    }
}

/// Entry point: initializes the panic hook and the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
