//! Configuration errors
//!
//! Raised when tunables or view parameters would break the simulation or
//! the tile iteration contract.

use thiserror::Error;

/// Errors raised when validating settings and view parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tile size must be positive and finite, got {width}x{height}")]
    InvalidTileSize { width: f32, height: f32 },
    #[error("zoom factor must be positive and finite, got {0}")]
    InvalidZoom(f32),
    #[error("zoom range [{min}, {max}] is empty or below the zoom floor")]
    InvalidZoomRange { min: f32, max: f32 },
    #[error("zoom sensitivity must be positive and finite, got {0}")]
    InvalidZoomSensitivity(f32),
    #[error("tile grid of {cols}x{rows} exceeds the supported size")]
    TooManyTiles { cols: f32, rows: f32 },
    #[error("canvas size must be non-negative, got {width}x{height}")]
    InvalidCanvasSize { width: f32, height: f32 },
    #[error("arena size must be positive, got {width}x{height}")]
    InvalidArenaSize { width: f32, height: f32 },
    #[error("ball lifetime must be positive, got {0}")]
    InvalidLifetime(f32),
    #[error("ball radius must be non-negative, got {0}")]
    InvalidRadius(f32),
    #[error("particle pool capacity must be non-zero")]
    ZeroCapacity,
    #[error("launch speed scale must be positive, got {0}")]
    InvalidSpeedScale(f32),
    #[error("settings file could not be read: {0}")]
    Io(String),
    #[error("settings could not be parsed: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
