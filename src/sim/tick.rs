//! Session transitions and the virtual-time game loop
//!
//! Calls made outside their preconditions are ignored rather than rejected:
//! a drop while nothing is moving, a start while a session is running, and so
//! on. The host can forward raw input without checking the phase first.

use super::schedule::PendingAction;
use super::scoring::score_drop;
use super::state::{GameEvent, GameSession, GameState, SessionPhase, StackedEntry};

/// One-shot commands for a single update
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a session (only from Idle)
    pub start: bool,
    /// Drop the moving item (click/tap/space)
    pub drop: bool,
    /// Close the game overlay
    pub close: bool,
    /// Restart button: back to Idle without closing
    pub reset: bool,
}

/// Apply `input`, then advance virtual time by `dt_ms`
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    if input.close {
        state.close_session();
    } else if input.reset {
        state.reset_session();
    }
    if input.start {
        state.start_session();
    }
    if input.drop {
        state.drop_item();
    }
    state.advance_time(dt_ms);
}

impl GameState {
    /// Begin a fresh session; stage 0 starts moving after the startup delay
    pub fn start_session(&mut self) {
        if self.session.phase != SessionPhase::Idle {
            log::debug!("start ignored in {:?}", self.session.phase);
            return;
        }

        self.cancel_pending();
        self.generation += 1;
        self.session = GameSession {
            phase: SessionPhase::AwaitingAdvance,
            ..Default::default()
        };
        self.movement.reset();
        self.schedule(self.config.start_delay_ms, PendingAction::BeginMoving);
        self.events.push(GameEvent::SessionStarted);

        log::info!(
            "Session {} started ({} stages)",
            self.generation,
            self.stage_count()
        );
    }

    /// One movement tick: step along the track, bouncing at the ends
    pub fn step(&mut self) {
        if self.session.phase != SessionPhase::Moving {
            return;
        }
        let max = self.config.max_position();
        self.movement.advance(self.config.step, max);
    }

    /// Commit the item at its current position and score it
    pub fn drop_item(&mut self) {
        if self.session.phase != SessionPhase::Moving
            || self.session.stage_index >= self.stage_count()
        {
            log::debug!("drop ignored in {:?}", self.session.phase);
            return;
        }

        self.stop_moving();

        let position = self.movement.position;
        let score = score_drop(
            position - self.config.center_position(),
            self.config.perfect_zone,
            self.config.good_zone,
        );
        let stage = &self.config.stages[self.session.stage_index];
        let entry = StackedEntry {
            stage_id: stage.id.clone(),
            dropped_position: position,
            accuracy: score.accuracy_pct(),
            points: score.points,
        };

        log::debug!(
            "Dropped {} at {:.1} (distance {:.1}): {}% for {} points",
            entry.stage_id,
            position,
            score.distance,
            entry.accuracy,
            entry.points
        );

        self.session.score += score.points;
        if score.perfect {
            self.session.perfect_count += 1;
        }
        self.session.entries.push(entry.clone());
        self.session.stage_index += 1;
        self.events.push(GameEvent::Dropped { entry });

        if self.session.stage_index < self.stage_count() {
            self.session.phase = SessionPhase::AwaitingAdvance;
            self.schedule(self.config.advance_delay_ms, PendingAction::PrepareStage);
        } else {
            self.session.phase = SessionPhase::Complete;
            self.schedule(self.config.completion_delay_ms, PendingAction::ComputeReward);
            log::info!(
                "Stack complete: score {}, {} perfect",
                self.session.score,
                self.session.perfect_count
            );
        }
    }

    /// Abandon the session and signal the host to hide the game
    pub fn close_session(&mut self) {
        self.reset_session();
        self.events.push(GameEvent::Closed);
    }

    /// Abandon the session; no reward is produced
    pub fn reset_session(&mut self) {
        self.cancel_pending();
        self.generation += 1;
        if self.session.phase != SessionPhase::Idle {
            log::info!("Session reset in {:?}", self.session.phase);
        }
        self.session = GameSession::default();
        self.movement.reset();
    }

    /// Advance virtual time, firing timers and movement ticks in time order.
    ///
    /// A timer and a tick due at the same instant fire timer first.
    pub fn advance_time(&mut self, dt_ms: u32) {
        let target = self.time_ms + dt_ms as u64;

        loop {
            let next_timer = self.timers.next_due();
            let next = match (next_timer, self.next_tick_at) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            let Some(at) = next.filter(|&at| at <= target) else {
                break;
            };
            self.time_ms = self.time_ms.max(at);

            if next_timer == Some(at) {
                if let Some(timer) = self.timers.pop_due(at) {
                    if timer.generation == self.generation {
                        self.fire(timer.action);
                    } else {
                        log::warn!("Dropping stale {:?} timer", timer.action);
                    }
                }
            } else {
                self.step();
                if self.next_tick_at.is_some() {
                    self.next_tick_at = Some(at + self.tick_interval());
                }
            }
        }

        self.time_ms = target;
    }

    fn fire(&mut self, action: PendingAction) {
        match action {
            PendingAction::BeginMoving => {
                if self.session.phase == SessionPhase::AwaitingAdvance {
                    self.start_moving();
                }
            }
            PendingAction::PrepareStage => {
                self.movement.reset();
                self.schedule(self.config.resume_delay_ms, PendingAction::BeginMoving);
            }
            PendingAction::ComputeReward => {
                let discount = self.session.compute_reward(&self.config);
                self.session.reward = Some(discount);
                self.events.push(GameEvent::RewardComputed { discount });
                self.schedule(
                    self.config.reward_report_delay_ms,
                    PendingAction::ReportReward,
                );
                log::info!("Reward computed: {}% discount", discount);
            }
            PendingAction::ReportReward => {
                if let Some(discount) = self.session.reward {
                    self.events.push(GameEvent::Completed { discount });
                }
            }
        }
    }

    /// Arm the tick source. Paired with `stop_moving`.
    fn start_moving(&mut self) {
        self.session.phase = SessionPhase::Moving;
        self.next_tick_at = Some(self.time_ms + self.tick_interval());

        let index = self.session.stage_index;
        if let Some(stage) = self.config.stages.get(index) {
            log::debug!("Stage {} ({}) moving", index + 1, stage.label);
            self.events.push(GameEvent::StageStarted {
                index,
                stage_id: stage.id.clone(),
            });
        }
    }

    fn stop_moving(&mut self) {
        self.next_tick_at = None;
    }

    fn cancel_pending(&mut self) {
        self.stop_moving();
        self.timers.cancel_all();
    }

    fn schedule(&mut self, delay_ms: u32, action: PendingAction) {
        let due = self.time_ms + delay_ms as u64;
        self.timers.schedule(due, self.generation, action);
    }

    #[inline]
    fn tick_interval(&self) -> u64 {
        self.config.tick_interval_ms.max(1) as u64
    }
}
