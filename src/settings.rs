//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web, or read from the JSON file named by
//! `SHUTTLE_COURT_SETTINGS` on native.

use serde::{Deserialize, Serialize};

use crate::consts::{RACKET_SPEED, SCORE_TO_WIN};

/// Fastest a racket may be configured to move per tick
pub const MAX_RACKET_SPEED: f32 = 40.0;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Match ===
    /// Points needed to win a round
    pub score_to_win: u32,
    /// Racket movement per tick
    pub racket_speed: f32,
    /// Fixed RNG seed (random per session when unset)
    pub seed: Option<u64>,

    // === HUD ===
    /// Show the controls hint along the top of the court
    pub show_controls: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            score_to_win: SCORE_TO_WIN,
            racket_speed: RACKET_SPEED,
            seed: None,

            show_controls: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Copy with every value pulled into its playable range
    pub fn sanitized(&self) -> Self {
        let racket_speed = if self.racket_speed.is_finite() && self.racket_speed > 0.0 {
            self.racket_speed.min(MAX_RACKET_SPEED)
        } else {
            RACKET_SPEED
        };
        Self {
            score_to_win: self.score_to_win.max(1),
            racket_speed,
            seed: self.seed,
            show_controls: self.show_controls,
            master_volume: clamp_volume(self.master_volume),
            sfx_volume: clamp_volume(self.sfx_volume),
            muted: self.muted,
        }
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(|s| s.sanitized())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "shuttle_court_settings";

    /// Environment variable naming the settings file (native only)
    pub const PATH_ENV: &'static str = "SHUTTLE_COURT_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Failed to serialize settings: {}", e),
            }
        }
    }

    /// Load settings from `$SHUTTLE_COURT_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.to_string_lossy());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.to_string_lossy(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.to_string_lossy(), e);
                Self::default()
            }
        }
    }

    /// Write settings back to `$SHUTTLE_COURT_SETTINGS` if it is set (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            return;
        };
        let result = self
            .to_json()
            .map_err(std::io::Error::other)
            .and_then(|json| std::fs::write(&path, json));
        match result {
            Ok(()) => log::info!("Settings saved to {}", path.to_string_lossy()),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) }
}
