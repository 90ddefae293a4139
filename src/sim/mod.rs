//! Deterministic stacking game module
//!
//! All minigame logic lives here. This module must be pure and deterministic:
//! - Virtual time only (the host feeds elapsed milliseconds)
//! - Every delay is a cancellable timer tied to its session
//! - No rendering or platform dependencies

pub mod schedule;
pub mod scoring;
pub mod state;
pub mod tick;

pub use schedule::{PendingAction, TimerQueue};
pub use scoring::{AccuracyGrade, DropScore, compute_reward, score_drop};
pub use state::{
    Direction, GameEvent, GameSession, GameSnapshot, GameState, MovementState, SessionPhase,
    StackedEntry, StageDefinition,
};
pub use tick::{TickInput, tick};
