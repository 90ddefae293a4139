//! Error types for the fallible edges of the crate
//!
//! The engine and cart themselves never fail; only parsing and loading do.

use thiserror::Error;

/// Invalid game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("item width {item_width} must be smaller than track width {track_width}")]
    TrackTooNarrow { track_width: f32, item_width: f32 },
    #[error("perfect zone {perfect} must be non-negative and smaller than good zone {good}")]
    ZoneOrder { perfect: f32, good: f32 },
    #[error("step size must be positive, got {0}")]
    NonPositiveStep(f32),
    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
    #[error("at least one stage is required")]
    NoStages,
    #[error("duplicate stage id {0:?}")]
    DuplicateStage(String),
    #[error("reward bounds {min}..={max} are invalid")]
    RewardBounds { min: u8, max: u8 },
}

/// Price string that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price is empty")]
    Empty,
    #[error("price {0:?} is not a dollar amount")]
    Malformed(String),
    #[error("price {0:?} has more than two decimal places")]
    TooPrecise(String),
    #[error("price {0:?} is too large")]
    Overflow(String),
}

/// Menu that could not be loaded
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("menu is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate menu item id {0}")]
    DuplicateItem(u32),
}
