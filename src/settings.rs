//! Runtime settings
//!
//! Defaults reproduce the classic game. On the web an embedded
//! `<script id="frogger-settings" type="application/json">` block may override them.

use serde::{Deserialize, Serialize};

use crate::consts::{SPEED_STEP, TICK_PERIOD_MS};
use crate::error::ConfigError;

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between ticks
    pub tick_period_ms: u32,
    /// Velocity magnitude added to every mover on each goal wave
    pub speed_step: i32,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_period_ms: TICK_PERIOD_MS,
            speed_step: SPEED_STEP,
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    /// DOM id of the optional embedded settings block
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "frogger-settings";

    /// Parse and validate settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_period_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.speed_step < 0 {
            return Err(ConfigError::Invalid {
                field: "speed_step",
                reason: format!("must not be negative, got {}", self.speed_step),
            });
        }
        Ok(())
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring embedded settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: settings come from `FROGGER_SETTINGS` (a JSON string) if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var("FROGGER_SETTINGS") {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Ignoring FROGGER_SETTINGS: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
