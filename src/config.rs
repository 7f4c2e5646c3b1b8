//! Application-level configuration constants.

// Tick loop
pub const TICK_MS: u32 = 1_000;
/// Pending cues fire this many milliseconds ahead of the tick boundary they
/// belong to, so the sound lands right as the display changes.
pub const CUE_LEAD_MS: u32 = 50;

// Static audio assets, fetched by URL at mount
pub const BEEP_SOUND_URL: &str =
    "https://assets.mixkit.co/active_storage/sfx/2870/2870-preview.mp3";
pub const ALARM_SOUND_URL: &str =
    "https://assets.mixkit.co/active_storage/sfx/2869/2869-preview.mp3";

// localStorage keys
pub const CONFIGS_STORAGE_KEY: &str = "timerConfigs";
pub const INSTALL_PROMPT_DISMISSED_KEY: &str = "iosInstallPromptDismissed";
