//! Player preferences
//!
//! Persisted in LocalStorage. Scores are never saved.

use serde::{Deserialize, Serialize};

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background arpeggio on/off
    pub music_enabled: bool,
    /// Sound effects on/off
    pub sfx_enabled: bool,
    /// Music bus gain (0.0 - 1.0)
    pub music_volume: f32,
    /// Effects bus gain (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sfx_enabled: true,
            music_volume: 0.12,
            sfx_volume: 0.6,
        }
    }
}

impl Settings {
    /// Gain actually applied to the music bus
    pub fn effective_music_gain(&self) -> f32 {
        if self.music_enabled {
            self.music_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Gain actually applied to the effects bus
    pub fn effective_sfx_gain(&self) -> f32 {
        if self.sfx_enabled {
            self.sfx_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Parse stored settings; anything unreadable yields `None`
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json)
            .map_err(|e| log::warn!("Ignoring stored settings: {}", e))
            .ok()
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "friends_snake_settings";

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Restore from LocalStorage, falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|json| Self::from_json(&json));
        match stored {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let (Some(storage), Ok(json)) = (Self::storage(), serde_json::to_string(self)) else {
            return;
        };
        if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
            log::info!("Settings saved");
        }
    }

    /// Nothing persists natively
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
