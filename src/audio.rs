//! Browser playback for timer cues.
//!
//! `CueAudio` owns the two audio elements and the pending cue timeout. A
//! cue is armed one tick early and fires `CUE_LEAD_MS` ahead of the boundary
//! it belongs to; at most one cue is pending at a time, and dropping the
//! handle (pause, reset, unmount, or re-arming) cancels it. Playback
//! failures are logged and never reach the UI: the tick loop does not care
//! whether a sound actually came out.

use crate::config::{ALARM_SOUND_URL, BEEP_SOUND_URL, CUE_LEAD_MS, TICK_MS};
use gloo_timers::callback::Timeout;
use lighthouse_timer::cues::Cue;
use log::{debug, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

/// Owns the shared audio output and the cue schedule.
pub struct CueAudio {
    beep: Option<HtmlAudioElement>,
    alarm: Option<HtmlAudioElement>,
    pending: Option<Timeout>,
    unlocked: bool,
}

impl CueAudio {
    pub fn new() -> Self {
        Self {
            beep: create_element(BEEP_SOUND_URL),
            alarm: create_element(ALARM_SOUND_URL),
            pending: None,
            unlocked: false,
        }
    }

    /// Arm `cue` for the upcoming tick boundary. Replaces (and thereby
    /// cancels) any cue still pending, so a boundary can never fire twice.
    pub fn arm(&mut self, cue: Cue) {
        let element = match cue {
            Cue::Warning | Cue::Countdown(_) => self.beep.clone(),
            Cue::Alarm => self.alarm.clone(),
        };
        let Some(element) = element else {
            return;
        };
        debug!("arming cue {:?}", cue);
        self.pending = Some(Timeout::new(TICK_MS - CUE_LEAD_MS, move || {
            play(&element);
        }));
    }

    /// Drop any not-yet-fired cue. Idempotent; called on pause, reset and
    /// unmount. A cue cancelled here is gone for good — resuming does not
    /// re-arm it.
    pub fn cancel_all(&mut self) {
        self.pending = None;
    }

    /// One-time muted play/pause on the first user gesture so later cues
    /// pass autoplay policies. Failure is logged and scheduling carries on;
    /// cues simply stay silent until the platform allows playback.
    pub fn unlock(&mut self) {
        if self.unlocked {
            return;
        }
        self.unlocked = true;
        for element in [self.beep.clone(), self.alarm.clone()]
            .into_iter()
            .flatten()
        {
            element.set_muted(true);
            match element.play() {
                Ok(promise) => spawn_local(async move {
                    match JsFuture::from(promise).await {
                        Ok(_) => {
                            let _ = element.pause();
                            element.set_current_time(0.0);
                            element.set_muted(false);
                        }
                        Err(err) => {
                            element.set_muted(false);
                            log_audio_error("audio unlock rejected", err);
                        }
                    }
                }),
                Err(err) => {
                    element.set_muted(false);
                    log_audio_error("audio unlock failed", err);
                }
            }
        }
    }
}

impl Default for CueAudio {
    fn default() -> Self {
        Self::new()
    }
}

fn create_element(url: &str) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(url) {
        Ok(element) => Some(element),
        Err(err) => {
            log_audio_error("failed to create audio element", err);
            None
        }
    }
}

fn play(element: &HtmlAudioElement) {
    element.set_current_time(0.0);
    match element.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log_audio_error("cue playback rejected", err);
            }
        }),
        Err(err) => log_audio_error("cue playback failed", err),
    }
}

fn log_audio_error(context: &str, err: JsValue) {
    warn!("{}: {:?}", context, err);
}
