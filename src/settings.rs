//! Player preferences
//!
//! Persisted in LocalStorage, separate from (non-persisted) game state.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all sound
    pub muted: bool,
    /// Vibrate through the host shell on success
    pub haptics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            haptics: true,
        }
    }
}

impl Settings {
    /// Effective sound effect volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Parse stored JSON, falling back to defaults on anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {e}");
                Self::default()
            }
        }
    }

    /// Parse, persist and return settings sent by the page
    pub fn replace_from_json(json: &str) -> Self {
        let settings = Self::from_json(json);
        settings.save();
        settings
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match local_storage().map(|storage| storage.get_item(STORAGE_KEY)) {
            Some(Ok(Some(json))) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            _ => {
                log::info!("No stored settings, using defaults");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = local_storage() else {
            log::warn!("LocalStorage unavailable - settings not saved");
            return;
        };
        let result = serde_json::to_string(self)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                storage
                    .set_item(STORAGE_KEY, &json)
                    .map_err(|e| format!("{e:?}"))
            });
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Saving settings failed: {e}"),
        }
    }

    /// Nothing to persist to outside the browser
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "jumping_hero_settings";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
