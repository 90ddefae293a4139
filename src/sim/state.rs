//! Stacking game state and core simulation types
//!
//! Everything the host needs to render or snapshot a session lives here.

use serde::{Deserialize, Serialize};

use super::schedule::TimerQueue;
use super::scoring::{AccuracyGrade, compute_reward};
use crate::config::GameConfig;

/// One ingredient round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub id: String,
    pub label: String,
}

impl StageDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// The default burger, bottom bun first
    pub fn burger() -> Vec<Self> {
        [
            ("bottom-bun", "Bottom Bun"),
            ("meat", "Meat Patty"),
            ("cheese", "Cheese"),
            ("lettuce", "Lettuce"),
            ("tomato", "Tomato"),
            ("onions", "Onions"),
            ("bacon", "Bacon"),
            ("top-bun", "Top Bun"),
        ]
        .into_iter()
        .map(|(id, label)| Self::new(id, label))
        .collect()
    }
}

/// Sweep direction along the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Left,
}

impl Direction {
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }
}

/// Position of the moving item
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MovementState {
    /// Left edge of the item, in `[0, max_position]`
    pub position: f32,
    pub direction: Direction,
}

impl MovementState {
    /// Back to the left edge, heading right
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move one step, bouncing off either end of `[0, max_position]`
    pub fn advance(&mut self, step: f32, max_position: f32) {
        self.position += self.direction.sign() * step;

        if self.position >= max_position {
            self.direction = Direction::Left;
            self.position = max_position;
        } else if self.position <= 0.0 {
            self.direction = Direction::Right;
            self.position = 0.0;
        }
    }
}

/// An ingredient that has been dropped onto the stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedEntry {
    pub stage_id: String,
    pub dropped_position: f32,
    /// Whole-percent accuracy (0-100)
    pub accuracy: u8,
    pub points: u32,
}

impl StackedEntry {
    pub fn grade(&self) -> AccuracyGrade {
        AccuracyGrade::from_accuracy(self.accuracy)
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session running
    #[default]
    Idle,
    /// Item sweeping, waiting for a drop
    Moving,
    /// Between stages (or before the first one)
    AwaitingAdvance,
    /// Every stage dropped
    Complete,
}

/// Progress of one play-through
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: SessionPhase,
    /// Index of the stage being played; equals the stage count once complete
    pub stage_index: usize,
    /// One entry per dropped stage, bottom first
    pub entries: Vec<StackedEntry>,
    pub score: u32,
    pub perfect_count: u32,
    /// Set once the completion pause has elapsed
    pub reward: Option<u8>,
}

impl GameSession {
    /// Reward this session would earn right now
    pub fn compute_reward(&self, config: &GameConfig) -> u8 {
        compute_reward(
            self.score,
            self.perfect_count,
            config.stage_count(),
            config.min_reward,
            config.max_reward,
        )
    }
}

/// Notifications for the host, drained after each update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    StageStarted { index: usize, stage_id: String },
    Dropped { entry: StackedEntry },
    RewardComputed { discount: u8 },
    /// Reported exactly once per completed session
    Completed { discount: u8 },
    Closed,
}

/// Complete stacking game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub session: GameSession,
    pub movement: MovementState,
    /// Bumped on every start/close/reset so stale timers can't fire
    pub generation: u64,
    /// Virtual time
    pub time_ms: u64,
    /// Next movement tick; `Some` exactly while moving
    pub(crate) next_tick_at: Option<u64>,
    pub(crate) timers: TimerQueue,
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            session: GameSession::default(),
            movement: MovementState::default(),
            generation: 0,
            time_ms: 0,
            next_tick_at: None,
            timers: TimerQueue::new(),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.session.phase == SessionPhase::Moving
    }

    /// Whether a movement tick source is currently armed
    #[inline]
    pub fn is_ticking(&self) -> bool {
        self.next_tick_at.is_some()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn stage_count(&self) -> usize {
        self.config.stage_count()
    }

    pub fn current_stage(&self) -> Option<&StageDefinition> {
        self.config.stages.get(self.session.stage_index)
    }

    /// Stages not yet played, excluding the current one
    pub fn remaining_stages(&self) -> &[StageDefinition] {
        let start = (self.session.stage_index + 1).min(self.config.stages.len());
        &self.config.stages[start..]
    }

    /// 1-based stage counter for the HUD
    pub fn stage_number(&self) -> usize {
        (self.session.stage_index + 1).min(self.stage_count())
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.session.phase,
            stage_number: self.stage_number(),
            stage_count: self.stage_count(),
            current_stage: self.current_stage().map(|s| s.label.clone()),
            position: self.movement.position,
            direction: self.movement.direction,
            center_position: self.config.center_position(),
            entries: self.session.entries.clone(),
            score: self.session.score,
            perfect_count: self.session.perfect_count,
            reward: self.session.reward,
        }
    }
}

/// Render-ready view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: SessionPhase,
    pub stage_number: usize,
    pub stage_count: usize,
    pub current_stage: Option<String>,
    pub position: f32,
    pub direction: Direction,
    pub center_position: f32,
    pub entries: Vec<StackedEntry>,
    pub score: u32,
    pub perfect_count: u32,
    pub reward: Option<u8>,
}
