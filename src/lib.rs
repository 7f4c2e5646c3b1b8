//! Core logic for the Lighthouse interval timer.
//!
//! The timer state machine, cue policy and saved-configuration model live
//! here with no browser dependencies, so every sequencing contract can be
//! exercised with plain `cargo test` and simulated ticks. The binary crate
//! layers the Yew UI, the real interval, audio playback and localStorage on
//! top of this.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cues;

/// Input bounds shared by the engine and the UI number fields.
pub mod limits {
    pub const MIN_SETS: u32 = 1;
    pub const MAX_SETS: u32 = 99;
    pub const MIN_TIME: u32 = 1;
    /// Upper bound for a duration entered in seconds.
    pub const MAX_SECONDS: u32 = 9999;
    /// Upper bound for a duration entered in minutes (166 min < 9999 s).
    pub const MAX_MINUTES: u32 = 166;
}

/// The two alternating timer segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

/// Lifecycle state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Paused,
    /// Terminal: every set has finished. Only `reset` leaves this state.
    Completed,
}

/// User-adjustable timer parameters. `duration` and `break_time` are stored
/// in the unit the user typed them in; the `*_in_minutes` flags say which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub sets: u32,
    pub duration: u32,
    pub break_time: u32,
    pub duration_in_minutes: bool,
    pub break_in_minutes: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            sets: 3,
            duration: 60,
            break_time: 30,
            duration_in_minutes: false,
            break_in_minutes: false,
        }
    }
}

impl TimerSettings {
    /// Length of one work phase in whole seconds.
    pub fn work_seconds(&self) -> u32 {
        if self.duration_in_minutes {
            self.duration * 60
        } else {
            self.duration
        }
    }

    /// Length of one break phase in whole seconds.
    pub fn break_seconds(&self) -> u32 {
        if self.break_in_minutes {
            self.break_time * 60
        } else {
            self.break_time
        }
    }
}

/// What happened at a tick boundary, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A work phase ended; the break is now counting down.
    BreakStarted,
    /// A break ended and the next set began.
    SetStarted,
    /// The final break ended; the whole workout is over.
    Finished,
}

/// Post-decrement snapshot returned by [`TimerEngine::tick`]. The cue layer
/// reads this exactly once per tick; `phase` and `remaining` already reflect
/// any transition that fired at this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub phase: Phase,
    pub remaining: u32,
    pub transition: Option<Transition>,
}

/// The interval-timer state machine.
///
/// ```text
/// Idle --start--> Running <--pause/start--> Paused
///   ^                |
///   |             (last break exhausted)
///   +--reset-- Completed
/// ```
///
/// `tick` is the single authoritative entry point for the passage of time;
/// the caller decides when a second has elapsed (a real `Interval` in the
/// browser, a plain loop in tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    settings: TimerSettings,
    current_set: u32,
    remaining: u32,
    phase: Phase,
    status: Status,
}

impl TimerEngine {
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            current_set: 0,
            remaining: 0,
            phase: Phase::Work,
            status: Status::Idle,
        }
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    /// Replace the settings. A phase already counting down keeps its
    /// remaining time; the new lengths apply from the next phase start.
    pub fn update_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    pub fn sets(&self) -> u32 {
        self.settings.sets
    }

    /// Begin a fresh run from Idle, or resume a paused one. A completed run
    /// stays completed until `reset`.
    pub fn start(&mut self) {
        match self.status {
            Status::Idle => {
                self.remaining = self.settings.work_seconds().max(1);
                self.current_set = 1;
                self.phase = Phase::Work;
                self.status = Status::Running;
                debug!(
                    "timer started: {} sets, {}s work / {}s break",
                    self.settings.sets,
                    self.settings.work_seconds(),
                    self.settings.break_seconds()
                );
            }
            Status::Paused => self.status = Status::Running,
            Status::Running | Status::Completed => {}
        }
    }

    /// Freeze the countdown. `remaining` and `phase` are untouched so a
    /// resume picks up exactly where the pause happened.
    pub fn pause(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Paused;
        }
    }

    /// Return to Idle from any state.
    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.current_set = 0;
        self.remaining = 0;
        self.phase = Phase::Work;
    }

    /// Advance one whole second. Returns the post-decrement snapshot while
    /// Running, `None` otherwise, so stray interval callbacks after a pause
    /// or completion are harmless.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.status != Status::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        let transition = if self.remaining == 0 {
            Some(self.advance_phase())
        } else {
            None
        };
        Some(Tick {
            phase: self.phase,
            remaining: self.remaining,
            transition,
        })
    }

    fn advance_phase(&mut self) -> Transition {
        match self.phase {
            Phase::Work => {
                self.phase = Phase::Break;
                self.remaining = self.settings.break_seconds().max(1);
                debug!(
                    "set {}/{} done, break for {}s",
                    self.current_set, self.settings.sets, self.remaining
                );
                Transition::BreakStarted
            }
            Phase::Break if self.current_set < self.settings.sets => {
                self.phase = Phase::Work;
                self.current_set += 1;
                self.remaining = self.settings.work_seconds().max(1);
                debug!("starting set {}/{}", self.current_set, self.settings.sets);
                Transition::SetStarted
            }
            Phase::Break => {
                self.status = Status::Completed;
                info!("workout complete after {} sets", self.settings.sets);
                Transition::Finished
            }
        }
    }
}

/// A saved timer preset. One localStorage entry holds a JSON array of these;
/// the serialized field names (`breakTime`, `isDurationMinutes`,
/// `isBreakMinutes`) are the on-disk layout and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub duration: u32,
    pub break_time: u32,
    pub is_duration_minutes: bool,
    pub is_break_minutes: bool,
}

impl TimerConfig {
    pub fn from_settings(id: String, name: String, settings: TimerSettings) -> Self {
        Self {
            id,
            name,
            sets: settings.sets,
            duration: settings.duration,
            break_time: settings.break_time,
            is_duration_minutes: settings.duration_in_minutes,
            is_break_minutes: settings.break_in_minutes,
        }
    }

    /// The settings this preset applies. Loading overwrites every field at
    /// once; there is no partial application.
    pub fn to_settings(&self) -> TimerSettings {
        TimerSettings {
            sets: self.sets,
            duration: self.duration,
            break_time: self.break_time,
            duration_in_minutes: self.is_duration_minutes,
            break_in_minutes: self.is_break_minutes,
        }
    }
}

// Errors from saved-configuration operations
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Another preset already uses this name (case-insensitive).
    DuplicateName(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateName(_) => write!(f, "Timer name already used"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Default preset name when the user saves without typing one.
pub fn default_config_name(configs: &[TimerConfig]) -> String {
    format!("TIMER {}", configs.len() + 1)
}

/// Append a preset, rejecting case-insensitive name collisions without
/// touching the existing list.
pub fn add_config(configs: &mut Vec<TimerConfig>, config: TimerConfig) -> Result<(), ConfigError> {
    let lowered = config.name.to_lowercase();
    if configs.iter().any(|c| c.name.to_lowercase() == lowered) {
        return Err(ConfigError::DuplicateName(config.name));
    }
    debug!("saved preset '{}'", config.name);
    configs.push(config);
    Ok(())
}

/// Remove a preset by id. Unknown ids are a no-op.
pub fn remove_config(configs: &mut Vec<TimerConfig>, id: &str) {
    configs.retain(|c| c.id != id);
}

/// Format whole seconds as MM:SS (e.g. 90 -> "01:30").
pub fn format_seconds(total: u32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds(sets: u32, duration: u32, break_time: u32) -> TimerSettings {
        TimerSettings {
            sets,
            duration,
            break_time,
            duration_in_minutes: false,
            break_in_minutes: false,
        }
    }

    fn preset(id: &str, name: &str) -> TimerConfig {
        TimerConfig::from_settings(id.to_string(), name.to_string(), TimerSettings::default())
    }

    #[test]
    fn completion_runs_every_set() {
        let settings = seconds(3, 2, 1);
        let mut engine = TimerEngine::new(settings);
        engine.start();
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.current_set(), 1);
        assert_eq!(engine.remaining(), 2);

        let mut breaks = 0;
        let mut set_starts = 0;
        let mut finished = 0;
        let mut ticks = 0;
        while let Some(tick) = engine.tick() {
            ticks += 1;
            match tick.transition {
                Some(Transition::BreakStarted) => breaks += 1,
                Some(Transition::SetStarted) => set_starts += 1,
                Some(Transition::Finished) => finished += 1,
                None => {}
            }
        }

        // 3 work phases (one from start, two from set starts), 3 breaks
        assert_eq!(breaks, 3);
        assert_eq!(set_starts, 2);
        assert_eq!(finished, 1);
        assert_eq!(ticks, 3 * (2 + 1));
        assert_eq!(engine.status(), Status::Completed);
        assert_eq!(engine.current_set(), engine.sets());
    }

    #[test]
    fn remaining_only_decreases_while_running() {
        let mut engine = TimerEngine::new(seconds(2, 5, 5));
        assert_eq!(engine.tick(), None);
        engine.start();
        engine.tick();
        engine.pause();
        let frozen = engine.remaining();
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.remaining(), frozen);
    }

    #[test]
    fn pause_then_resume_preserves_phase_and_remaining() {
        let mut engine = TimerEngine::new(seconds(2, 4, 3));
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.remaining(), 2);

        engine.pause();
        assert_eq!(engine.status(), Status::Paused);
        engine.start();
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.remaining(), 2);
        assert_eq!(engine.phase(), Phase::Work);

        // tick count preserved: two more ticks exhaust the work phase
        engine.tick();
        let tick = engine.tick().unwrap();
        assert_eq!(tick.transition, Some(Transition::BreakStarted));
        assert_eq!(tick.phase, Phase::Break);
        assert_eq!(tick.remaining, 3);
    }

    #[test]
    fn reset_returns_to_idle_from_any_state() {
        let mut engine = TimerEngine::new(seconds(1, 1, 1));

        engine.reset();
        assert_eq!(engine.status(), Status::Idle);

        engine.start();
        engine.reset();
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.current_set(), 0);
        assert_eq!(engine.phase(), Phase::Work);

        engine.start();
        engine.pause();
        engine.reset();
        assert_eq!(engine.status(), Status::Idle);

        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.status(), Status::Completed);
        engine.reset();
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.current_set(), 0);
    }

    #[test]
    fn completed_is_terminal_until_reset() {
        let mut engine = TimerEngine::new(seconds(1, 1, 1));
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.status(), Status::Completed);
        assert_eq!(engine.tick(), None);
        engine.start();
        assert_eq!(engine.status(), Status::Completed);
    }

    #[test]
    fn minute_flagged_settings_convert_to_seconds() {
        let settings = TimerSettings {
            sets: 1,
            duration: 2,
            break_time: 90,
            duration_in_minutes: true,
            break_in_minutes: false,
        };
        assert_eq!(settings.work_seconds(), 120);
        assert_eq!(settings.break_seconds(), 90);

        let mut engine = TimerEngine::new(settings);
        engine.start();
        assert_eq!(engine.remaining(), 120);
    }

    #[test]
    fn settings_changes_apply_from_next_phase() {
        let mut engine = TimerEngine::new(seconds(2, 3, 5));
        engine.start();
        engine.tick();
        let mut updated = engine.settings();
        updated.break_time = 7;
        engine.update_settings(updated);
        assert_eq!(engine.remaining(), 2); // current phase untouched

        engine.tick();
        let tick = engine.tick().unwrap();
        assert_eq!(tick.transition, Some(Transition::BreakStarted));
        assert_eq!(tick.remaining, 7);
    }

    #[test]
    fn duplicate_name_is_rejected_case_insensitively() {
        let mut configs = Vec::new();
        add_config(&mut configs, preset("1", "Leg Day")).unwrap();
        let err = add_config(&mut configs, preset("2", "LEG DAY")).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateName("LEG DAY".to_string()));
        assert_eq!(err.to_string(), "Timer name already used");
        assert_eq!(configs.len(), 1);
    }

    #[test]
    fn default_names_number_from_list_length() {
        let mut configs = Vec::new();
        assert_eq!(default_config_name(&configs), "TIMER 1");
        add_config(&mut configs, preset("1", "TIMER 1")).unwrap();
        assert_eq!(default_config_name(&configs), "TIMER 2");
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut configs = vec![preset("1", "a"), preset("2", "b")];
        remove_config(&mut configs, "missing");
        assert_eq!(configs.len(), 2);
        remove_config(&mut configs, "1");
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].id, "2");
    }

    #[test]
    fn loading_a_preset_overwrites_every_field() {
        let saved = TimerConfig {
            id: "7".to_string(),
            name: "Leg Day".to_string(),
            sets: 5,
            duration: 2,
            break_time: 45,
            is_duration_minutes: true,
            is_break_minutes: false,
        };
        let settings = saved.to_settings();
        assert_eq!(settings.sets, 5);
        assert_eq!(settings.duration, 2);
        assert_eq!(settings.break_time, 45);
        assert!(settings.duration_in_minutes);
        assert!(!settings.break_in_minutes);
    }

    #[test]
    fn persisted_layout_uses_original_field_names() {
        let json = serde_json::to_value(preset("123", "Leg Day")).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "id",
            "name",
            "sets",
            "duration",
            "breakTime",
            "isDurationMinutes",
            "isBreakMinutes",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn format_seconds_pads_minutes_and_seconds() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(90), "01:30");
        assert_eq!(format_seconds(600), "10:00");
        assert_eq!(format_seconds(3599), "59:59");
    }
}
