//! localStorage persistence for saved timer configurations.
//!
//! Thin glue over `web_sys::Storage`. The persisted layout is a single key
//! holding a JSON array of `TimerConfig` records. Every failure path
//! degrades: reads fall back to an empty list, writes are logged and the
//! in-memory list stays authoritative for the session.

use crate::config::{CONFIGS_STORAGE_KEY, INSTALL_PROMPT_DISMISSED_KEY};
use lighthouse_timer::TimerConfig;
use log::warn;
use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    match gloo_utils::window().local_storage() {
        Ok(Some(storage)) => Some(storage),
        Ok(None) => None,
        Err(err) => {
            warn!("localStorage unavailable: {:?}", err);
            None
        }
    }
}

/// Read the saved configuration list. Unavailable storage or corrupt JSON
/// counts as "no saved configs".
pub fn load_configs() -> Vec<TimerConfig> {
    let Some(storage) = local_storage() else {
        return Vec::new();
    };
    match storage.get_item(CONFIGS_STORAGE_KEY) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(configs) => configs,
            Err(err) => {
                warn!("discarding corrupt saved configs: {}", err);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!("failed to read saved configs: {:?}", err);
            Vec::new()
        }
    }
}

/// Write the configuration list back under the same key.
pub fn persist_configs(configs: &[TimerConfig]) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(configs) {
        Ok(json) => {
            if let Err(err) = storage.set_item(CONFIGS_STORAGE_KEY, &json) {
                warn!("failed to persist saved configs: {:?}", err);
            }
        }
        Err(err) => warn!("failed to serialize saved configs: {}", err),
    }
}

/// Whether the install prompt was dismissed on a previous visit.
pub fn install_prompt_dismissed() -> bool {
    local_storage()
        .and_then(|s| s.get_item(INSTALL_PROMPT_DISMISSED_KEY).ok().flatten())
        .is_some()
}

pub fn remember_install_prompt_dismissed() {
    if let Some(storage) = local_storage() {
        if let Err(err) = storage.set_item(INSTALL_PROMPT_DISMISSED_KEY, "true") {
            warn!("failed to remember install prompt dismissal: {:?}", err);
        }
    }
}
