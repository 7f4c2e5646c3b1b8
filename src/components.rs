//! Yew view components for the timer UI.
//!
//! Input widgets keep their own text state and validate on commit; the
//! parent only ever sees committed, in-bounds values. `SavedConfigs` owns
//! the preset list end to end (load, save, delete, persistence) and hands
//! the parent nothing but loaded presets.

use crate::storage;
use crate::utils::{
    parse_duration_entry, validate_duration_entry, validate_numeric_input, DurationEntry,
    EntryUnit,
};
use lighthouse_timer::{add_config, default_config_name, TimerConfig, TimerSettings};
use log::info;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Stepper-style numeric input: − / + buttons plus free text entry that is
/// validated and clamped on commit.
#[derive(Properties, PartialEq)]
pub struct NumberInputProps {
    pub label: AttrValue,
    pub value: u32,
    pub min: u32,
    pub max: u32,
    pub onchange: Callback<u32>,
}

#[function_component(NumberInput)]
pub fn number_input(props: &NumberInputProps) -> Html {
    let text = use_state(|| props.value.to_string());
    let error = use_state(|| None::<String>);

    // keep the text in step with parent-driven value changes (preset loads)
    {
        let text = text.clone();
        let error = error.clone();
        use_effect_with(props.value, move |value| {
            let formatted = value.to_string();
            if *text != formatted {
                text.set(formatted);
                error.set(None);
            }
            || ()
        });
    }

    let oninput = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let commit = {
        let text = text.clone();
        let error = error.clone();
        let onchange = props.onchange.clone();
        let (min, max) = (props.min, props.max);
        let label = props.label.clone();
        Callback::from(move |_: ()| {
            let text_val = (*text).clone();
            match validate_numeric_input::<u32>(&text_val, Some(min), Some(max), label.as_str()) {
                Ok(value) => {
                    error.set(None);
                    text.set(value.to_string());
                    onchange.emit(value);
                }
                Err(msg) => error.set(Some(msg)),
            }
        })
    };

    let onkeydown = {
        let commit = commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };

    let decrement = {
        let onchange = props.onchange.clone();
        let (value, min) = (props.value, props.min);
        Callback::from(move |_| onchange.emit(value.saturating_sub(1).max(min)))
    };
    let increment = {
        let onchange = props.onchange.clone();
        let (value, max) = (props.value, props.max);
        Callback::from(move |_| onchange.emit((value + 1).min(max)))
    };

    html! {
        <div class="number-input">
            <button class="stepper" onclick={decrement} aria-label="Decrease">{ "−" }</button>
            <input
                type="text"
                inputmode="numeric"
                value={(*text).clone()}
                class={if (*error).is_some() { "invalid" } else { "" }}
                oninput={oninput}
                onchange={commit.reform(|_| ())}
                onkeydown={onkeydown}
            />
            <button class="stepper" onclick={increment} aria-label="Increase">{ "+" }</button>
            if let Some(ref err) = *error {
                <div class="input-error">{ err }</div>
            }
        </div>
    }
}

/// Duration field with a unit toggle button. Accepts bare numbers in the
/// field's current unit as well as explicit "1:30" / "90s" / "2m" entries,
/// which carry their own unit.
#[derive(Properties, PartialEq)]
pub struct DurationInputProps {
    pub value: u32,
    pub in_minutes: bool,
    pub on_commit: Callback<DurationEntry>,
    pub on_toggle_unit: Callback<()>,
}

#[function_component(DurationInput)]
pub fn duration_input(props: &DurationInputProps) -> Html {
    let text = use_state(|| props.value.to_string());
    let error = use_state(|| None::<String>);

    {
        let text = text.clone();
        let error = error.clone();
        use_effect_with(props.value, move |value| {
            let formatted = value.to_string();
            if *text != formatted {
                text.set(formatted);
                error.set(None);
            }
            || ()
        });
    }

    let oninput = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let commit = {
        let text = text.clone();
        let error = error.clone();
        let on_commit = props.on_commit.clone();
        let in_minutes = props.in_minutes;
        Callback::from(move |_: ()| {
            let text_val = (*text).clone();
            let parsed = parse_duration_entry(&text_val)
                .and_then(|entry| validate_duration_entry(entry, in_minutes));
            match parsed {
                Ok(entry) => {
                    error.set(None);
                    text.set(entry.value.to_string());
                    on_commit.emit(entry);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        })
    };

    let onkeydown = {
        let commit = commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };

    let decrement = {
        let on_commit = props.on_commit.clone();
        let value = props.value;
        Callback::from(move |_| {
            on_commit.emit(DurationEntry {
                value: value.saturating_sub(1).max(1),
                unit: None,
            })
        })
    };
    let increment = {
        let on_commit = props.on_commit.clone();
        let value = props.value;
        let max = crate::utils::duration_max(props.in_minutes);
        Callback::from(move |_| {
            on_commit.emit(DurationEntry {
                value: (value + 1).min(max),
                unit: None,
            })
        })
    };

    let toggle_unit = {
        let on_toggle_unit = props.on_toggle_unit.clone();
        Callback::from(move |_| on_toggle_unit.emit(()))
    };

    html! {
        <div class="duration-input">
            <button class="stepper" onclick={decrement} aria-label="Decrease">{ "−" }</button>
            <input
                type="text"
                inputmode="numeric"
                value={(*text).clone()}
                class={if (*error).is_some() { "invalid" } else { "" }}
                placeholder="90, 1:30, 2m"
                oninput={oninput}
                onchange={commit.reform(|_| ())}
                onkeydown={onkeydown}
            />
            <button class="stepper" onclick={increment} aria-label="Increase">{ "+" }</button>
            <button class="unit-toggle" onclick={toggle_unit}>
                { if props.in_minutes { "Minutes" } else { "Seconds" } }
            </button>
            if let Some(ref err) = *error {
                <div class="input-error">{ err }</div>
            }
        </div>
    }
}

/// Saved preset list: name entry, save button, and one row per preset with
/// load and delete actions. Owns its storage round-trips.
#[derive(Properties, PartialEq)]
pub struct SavedConfigsProps {
    pub settings: TimerSettings,
    pub on_load: Callback<TimerConfig>,
}

#[function_component(SavedConfigs)]
pub fn saved_configs(props: &SavedConfigsProps) -> Html {
    let configs = use_state(Vec::<TimerConfig>::new);
    let show_menu = use_state(|| false);
    let name_text = use_state(String::new);
    let name_error = use_state(|| None::<String>);

    {
        let configs = configs.clone();
        use_effect_with((), move |_| {
            configs.set(storage::load_configs());
            || ()
        });
    }

    let name_oninput = {
        let name_text = name_text.clone();
        let name_error = name_error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name_text.set(input.value());
            name_error.set(None);
        })
    };

    let save = {
        let configs = configs.clone();
        let name_text = name_text.clone();
        let name_error = name_error.clone();
        let settings = props.settings;
        Callback::from(move |_| {
            let mut updated = (*configs).clone();
            let trimmed = name_text.trim().to_string();
            let name = if trimmed.is_empty() {
                default_config_name(&updated)
            } else {
                trimmed
            };
            let config =
                TimerConfig::from_settings(js_sys::Date::now().to_string(), name, settings);
            match add_config(&mut updated, config) {
                Ok(()) => {
                    storage::persist_configs(&updated);
                    configs.set(updated);
                    name_text.set(String::new());
                    name_error.set(None);
                }
                Err(err) => name_error.set(Some(err.to_string())),
            }
        })
    };

    let toggle_menu = {
        let show_menu = show_menu.clone();
        Callback::from(move |_| show_menu.set(!*show_menu))
    };

    html! {
        <div class="saved-configs">
            <button class="btn-ghost" onclick={toggle_menu}>
                { if *show_menu { "Hide saved timers" } else { "Saved timers" } }
            </button>

            if *show_menu {
                <div class="saved-configs-menu">
                    <div class="save-row">
                        <input
                            value={(*name_text).clone()}
                            placeholder="TIMER NAME"
                            class={if (*name_error).is_some() { "invalid" } else { "" }}
                            oninput={name_oninput}
                        />
                        <button class="btn-primary" onclick={save}>{ "SAVE" }</button>
                    </div>
                    if let Some(ref err) = *name_error {
                        <div class="input-error">{ err }</div>
                    }

                    { for configs.iter().map(|config| {
                        render_config_row(config, &configs, &props.on_load)
                    }) }
                </div>
            }
        </div>
    }
}

/// One saved-preset row with load and delete buttons.
fn render_config_row(
    config: &TimerConfig,
    configs: &UseStateHandle<Vec<TimerConfig>>,
    on_load: &Callback<TimerConfig>,
) -> Html {
    let load = {
        let on_load = on_load.clone();
        let config = config.clone();
        Callback::from(move |_| {
            info!("loading preset '{}'", config.name);
            on_load.emit(config.clone());
        })
    };
    let delete = {
        let configs = configs.clone();
        let id = config.id.clone();
        Callback::from(move |_| {
            let mut updated = (*configs).clone();
            lighthouse_timer::remove_config(&mut updated, &id);
            storage::persist_configs(&updated);
            configs.set(updated);
        })
    };

    html! {
        <div class="config-row" key={config.id.clone()}>
            <span class="config-name">{ config.name.to_uppercase() }</span>
            <span class="config-summary">{
                format!(
                    "{} × {}{} / {}{}",
                    config.sets,
                    config.duration,
                    if config.is_duration_minutes { "m" } else { "s" },
                    config.break_time,
                    if config.is_break_minutes { "m" } else { "s" },
                )
            }</span>
            <button class="btn-ghost" onclick={load}>{ "LOAD" }</button>
            <button class="btn-danger" onclick={delete}>{ "✕" }</button>
        </div>
    }
}

fn is_ios() -> bool {
    gloo_utils::window()
        .navigator()
        .user_agent()
        .map(|ua| ua.contains("iPhone") || ua.contains("iPad") || ua.contains("iPod"))
        .unwrap_or(false)
}

fn is_standalone() -> bool {
    gloo_utils::window()
        .match_media("(display-mode: standalone)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Dismissible "Add to Home Screen" banner for iOS Safari; dismissal is
/// remembered across visits.
#[function_component(InstallPrompt)]
pub fn install_prompt() -> Html {
    let visible = use_state(|| false);

    {
        let visible = visible.clone();
        use_effect_with((), move |_| {
            if is_ios() && !is_standalone() && !storage::install_prompt_dismissed() {
                visible.set(true);
            }
            || ()
        });
    }

    let close = {
        let visible = visible.clone();
        Callback::from(move |_| {
            storage::remember_install_prompt_dismissed();
            visible.set(false);
        })
    };

    if !*visible {
        return html! {};
    }

    html! {
        <div class="install-prompt">
            <div class="install-prompt-text">
                <p class="install-prompt-title">{ "Install Lighthouse Timer" }</p>
                <p>{ "Tap the share icon and select \"Add to Home Screen\"." }</p>
            </div>
            <button class="btn-ghost" onclick={close} aria-label="Dismiss">{ "✕" }</button>
        </div>
    }
}
