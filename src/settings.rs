//! Simulation tunables
//!
//! Backed by sliders in the host UI. Persisted separately from anything else
//! in LocalStorage on the web, or loaded from a JSON file natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Slider-backed simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Balls ===
    /// Seconds a ball lives before fading out
    pub ball_lifetime: f32,
    /// Ball radius in arena units
    pub ball_radius: f32,
    /// Fixed capacity of the particle ring
    pub max_particles: usize,
    /// Drag length to launch speed multiplier
    pub launch_speed_scale: f32,

    // === Arena ===
    /// Arena (tile) width
    pub arena_width: f32,
    /// Arena (tile) height
    pub arena_height: f32,

    // === Zoom ===
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Scroll delta to log-zoom factor
    pub zoom_sensitivity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_lifetime: BALL_LIFETIME,
            ball_radius: BALL_RADIUS,
            max_particles: MAX_PARTICLES,
            launch_speed_scale: LAUNCH_SPEED_SCALE,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_sensitivity: ZOOM_SENSITIVITY,
        }
    }
}

impl Settings {
    /// Check every tunable, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0)
            || !self.arena_width.is_finite()
            || !self.arena_height.is_finite()
        {
            return Err(ConfigError::InvalidArenaSize {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !(self.ball_lifetime > 0.0) {
            return Err(ConfigError::InvalidLifetime(self.ball_lifetime));
        }
        if !(self.ball_radius >= 0.0) {
            return Err(ConfigError::InvalidRadius(self.ball_radius));
        }
        if self.max_particles == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(self.launch_speed_scale > 0.0) {
            return Err(ConfigError::InvalidSpeedScale(self.launch_speed_scale));
        }
        if !(self.min_zoom >= ZOOM_FLOOR && self.min_zoom <= self.max_zoom)
            || !self.max_zoom.is_finite()
        {
            return Err(ConfigError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(self.zoom_sensitivity > 0.0) || !self.zoom_sensitivity.is_finite() {
            return Err(ConfigError::InvalidZoomSensitivity(self.zoom_sensitivity));
        }
        Ok(())
    }

    /// Arena (tile) size as a vector
    pub fn arena_size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.arena_width, self.arena_height)
    }

    /// Clamp a zoom factor into the configured range
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "mirror_bounce_settings";

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
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
