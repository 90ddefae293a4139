//! Game configuration
//!
//! Every tunable the stacking game uses lives here so a host can supply its
//! own track geometry, timings and stage list at construction.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::StageDefinition;

/// Stacking game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Track geometry ===
    /// Width of the track the item sweeps across
    pub track_width: f32,
    /// Width of the moving item
    pub item_width: f32,
    /// Distance from center that still counts as perfect
    pub perfect_zone: f32,
    /// Distance from center that still counts as good
    pub good_zone: f32,
    /// Position units moved per movement tick
    pub step: f32,

    // === Timings (ms) ===
    /// Movement tick cadence
    pub tick_interval_ms: u32,
    /// Pause between starting a session and the first stage moving
    pub start_delay_ms: u32,
    /// Pause after a drop before the next stage is prepared
    pub advance_delay_ms: u32,
    /// Pause between preparing a stage and it starting to move
    pub resume_delay_ms: u32,
    /// Pause after the last drop before the reward is computed
    pub completion_delay_ms: u32,
    /// Pause between computing the reward and reporting it
    pub reward_report_delay_ms: u32,

    // === Reward ===
    pub min_reward: u8,
    pub max_reward: u8,

    /// Ingredient stages, bottom to top
    pub stages: Vec<StageDefinition>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            track_width: TRACK_WIDTH,
            item_width: ITEM_WIDTH,
            perfect_zone: PERFECT_ZONE,
            good_zone: GOOD_ZONE,
            step: STEP,

            tick_interval_ms: TICK_INTERVAL_MS,
            start_delay_ms: START_DELAY_MS,
            advance_delay_ms: ADVANCE_DELAY_MS,
            resume_delay_ms: RESUME_DELAY_MS,
            completion_delay_ms: COMPLETION_DELAY_MS,
            reward_report_delay_ms: REWARD_REPORT_DELAY_MS,

            min_reward: MIN_REWARD,
            max_reward: MAX_REWARD,

            stages: StageDefinition::burger(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded game config: {} stages, track {}",
            config.stages.len(),
            config.track_width
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.item_width < self.track_width) {
            return Err(ConfigError::TrackTooNarrow {
                track_width: self.track_width,
                item_width: self.item_width,
            });
        }
        if !(self.perfect_zone >= 0.0 && self.perfect_zone < self.good_zone) {
            return Err(ConfigError::ZoneOrder {
                perfect: self.perfect_zone,
                good: self.good_zone,
            });
        }
        if !(self.step > 0.0) {
            return Err(ConfigError::NonPositiveStep(self.step));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.stages.is_empty() {
            return Err(ConfigError::NoStages);
        }
        for (i, stage) in self.stages.iter().enumerate() {
            if self.stages[..i].iter().any(|s| s.id == stage.id) {
                return Err(ConfigError::DuplicateStage(stage.id.clone()));
            }
        }
        if self.min_reward > self.max_reward || self.max_reward > 100 {
            return Err(ConfigError::RewardBounds {
                min: self.min_reward,
                max: self.max_reward,
            });
        }
        Ok(())
    }

    /// Rightmost position the item can reach
    #[inline]
    pub fn max_position(&self) -> f32 {
        self.track_width - self.item_width
    }

    /// Position where the item sits dead center on the stack
    #[inline]
    pub fn center_position(&self) -> f32 {
        self.max_position() / 2.0
    }

    #[inline]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Clamp a raw reward percentage into the configured bounds.
    ///
    /// Inverted bounds resolve to `max_reward` instead of panicking.
    pub fn clamp_reward(&self, pct: i64) -> u8 {
        pct.max(self.min_reward as i64).min(self.max_reward as i64) as u8
    }
}
