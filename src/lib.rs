//! Stack Shack - burger stacking minigame and cart engine
//!
//! Core modules:
//! - `sim`: Deterministic stacking game (movement, drops, scoring, timers)
//! - `cart`: Quantity-aggregated shopping cart
//! - `catalog`: Restaurant menu and prices
//! - `storefront`: Application context tying the game reward to the cart
//! - `clock`: Time sources for driving the simulation
//! - `config`: Data-driven game tuning

pub mod cart;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod sim;
pub mod storefront;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, MenuItem, Price};
pub use config::GameConfig;
pub use error::{CatalogError, ConfigError, PriceError};
pub use storefront::{Discount, StoreEvent, Storefront};

/// Game configuration defaults
pub mod consts {
    /// Track the item sweeps across
    pub const TRACK_WIDTH: f32 = 320.0;
    pub const ITEM_WIDTH: f32 = 80.0;

    /// Drop accuracy zones (distance from center)
    pub const PERFECT_ZONE: f32 = 40.0;
    pub const GOOD_ZONE: f32 = 80.0;

    /// Position units per movement tick
    pub const STEP: f32 = 4.0;
    /// Movement tick cadence (~60 Hz)
    pub const TICK_INTERVAL_MS: u32 = 16;

    /// Scheduled pauses
    pub const START_DELAY_MS: u32 = 500;
    pub const ADVANCE_DELAY_MS: u32 = 800;
    pub const RESUME_DELAY_MS: u32 = 300;
    pub const COMPLETION_DELAY_MS: u32 = 1000;
    pub const REWARD_REPORT_DELAY_MS: u32 = 2000;

    /// Reward (discount percent) bounds
    pub const MIN_REWARD: u8 = 5;
    pub const MAX_REWARD: u8 = 50;

    /// Points for a single drop at full accuracy
    pub const MAX_POINTS_PER_STAGE: u32 = 100;

    /// Longest frame delta the driver forwards, to prevent spiral of death
    pub const MAX_FRAME_MS: u32 = 250;
}
