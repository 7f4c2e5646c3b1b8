//! Audio cue policy: which sound, if any, belongs to a countdown boundary.
//!
//! The decision is pure so it can be tested without an audio element. The
//! binary's `audio` module owns playback and the pending timeouts; it arms
//! the cue for the *next* boundary on every tick, which is why this module
//! speaks of boundary values rather than the engine's current `remaining`.

use crate::Phase;

/// Countdown value at which the early-warning beep plays.
pub const WARNING_AT: u32 = 10;
/// The 3-2-1 beeps cover values `1..=COUNTDOWN_FROM`.
pub const COUNTDOWN_FROM: u32 = 3;

/// Which optional beeps the user has enabled. The phase-completion alarm is
/// unconditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueOptions {
    pub ten_second_warning: bool,
    pub countdown: bool,
}

impl Default for CueOptions {
    fn default() -> Self {
        Self {
            ten_second_warning: true,
            countdown: true,
        }
    }
}

/// A single sound tied to one countdown boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Short beep when a work phase reaches the ten-second mark.
    Warning,
    /// Short beep at each of the last three seconds of a work phase.
    Countdown(u32),
    /// Phase-completion alarm; plays for work and break alike.
    Alarm,
}

/// Cue for the boundary where the countdown reaches `value` during `phase`.
///
/// Warning and countdown beeps accompany work phases only; the alarm marks
/// every phase end regardless of the options. Exactly one tick produces each
/// boundary value, so a cue can never fire twice for the same boundary.
pub fn cue_at_boundary(phase: Phase, value: u32, options: &CueOptions) -> Option<Cue> {
    if value == 0 {
        return Some(Cue::Alarm);
    }
    if phase != Phase::Work {
        return None;
    }
    match value {
        WARNING_AT if options.ten_second_warning => Some(Cue::Warning),
        1..=COUNTDOWN_FROM if options.countdown => Some(Cue::Countdown(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Status, TimerEngine, TimerSettings};

    fn seconds(sets: u32, duration: u32, break_time: u32) -> TimerSettings {
        TimerSettings {
            sets,
            duration,
            break_time,
            duration_in_minutes: false,
            break_in_minutes: false,
        }
    }

    /// Drive an engine to completion, arming cues exactly the way the UI
    /// does: once at start, then once per tick for the next boundary. The
    /// returned list is every cue that actually fired.
    fn run_and_collect(settings: TimerSettings, options: CueOptions) -> Vec<Cue> {
        let mut engine = TimerEngine::new(settings);
        let mut fired = Vec::new();

        engine.start();
        let mut pending = cue_at_boundary(
            engine.phase(),
            engine.remaining().saturating_sub(1),
            &options,
        );
        while let Some(tick) = engine.tick() {
            // the armed timeout fires just ahead of this boundary
            if let Some(cue) = pending.take() {
                fired.push(cue);
            }
            if engine.status() != Status::Running {
                break;
            }
            pending = cue_at_boundary(tick.phase, tick.remaining - 1, &options);
        }
        fired
    }

    #[test]
    fn symmetric_single_set_fires_the_documented_counts() {
        let fired = run_and_collect(seconds(1, 15, 15), CueOptions::default());

        let warnings = fired.iter().filter(|c| **c == Cue::Warning).count();
        let countdowns: Vec<u32> = fired
            .iter()
            .filter_map(|c| match c {
                Cue::Countdown(v) => Some(*v),
                _ => None,
            })
            .collect();
        let alarms = fired.iter().filter(|c| **c == Cue::Alarm).count();

        // work phase only: 10-beep once, 3-2-1 once each; alarm per phase end
        assert_eq!(warnings, 1);
        assert_eq!(countdowns, vec![3, 2, 1]);
        assert_eq!(alarms, 2);
    }

    #[test]
    fn disabled_options_leave_only_the_alarm() {
        let options = CueOptions {
            ten_second_warning: false,
            countdown: false,
        };
        let fired = run_and_collect(seconds(2, 15, 12), options);
        assert_eq!(fired.len(), 4); // one alarm per phase end, 2 sets
        assert!(fired.iter().all(|c| *c == Cue::Alarm));
    }

    #[test]
    fn break_boundaries_get_no_beeps() {
        for value in [WARNING_AT, 3, 2, 1] {
            assert_eq!(
                cue_at_boundary(Phase::Break, value, &CueOptions::default()),
                None
            );
        }
        assert_eq!(
            cue_at_boundary(Phase::Break, 0, &CueOptions::default()),
            Some(Cue::Alarm)
        );
    }

    #[test]
    fn one_second_phases_still_alarm() {
        let fired = run_and_collect(seconds(2, 1, 1), CueOptions::default());
        assert_eq!(fired.len(), 4);
        assert!(fired.iter().all(|c| *c == Cue::Alarm));
    }

    #[test]
    fn short_work_phase_skips_the_warning() {
        let fired = run_and_collect(seconds(1, 8, 8), CueOptions::default());
        assert!(!fired.contains(&Cue::Warning));
        assert_eq!(
            fired
                .iter()
                .filter(|c| matches!(c, Cue::Countdown(_)))
                .count(),
            3
        );
    }
}
