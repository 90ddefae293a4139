//! Drop accuracy and reward math
//!
//! Pure functions; the state machine in `tick` feeds them distances and
//! totals and records what they return.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_POINTS_PER_STAGE;

/// Outcome of a single drop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropScore {
    /// Distance between the dropped position and center
    pub distance: f32,
    /// Accuracy percentage before rounding
    pub accuracy: f32,
    pub points: u32,
    pub perfect: bool,
}

impl DropScore {
    /// Accuracy as a whole percentage
    pub fn accuracy_pct(&self) -> u8 {
        self.accuracy.round().clamp(0.0, 100.0) as u8
    }
}

/// Score a drop `distance` units from center.
///
/// Both zone checks are inclusive: a drop exactly on `good_zone` still lands
/// in the good tier.
pub fn score_drop(distance: f32, perfect_zone: f32, good_zone: f32) -> DropScore {
    let distance = distance.abs();

    if distance <= perfect_zone {
        DropScore {
            distance,
            accuracy: 100.0,
            points: MAX_POINTS_PER_STAGE,
            perfect: true,
        }
    } else if distance <= good_zone {
        let accuracy = (100.0 - (distance - perfect_zone) * 2.0).max(50.0);
        DropScore {
            distance,
            accuracy,
            points: accuracy.round() as u32,
            perfect: false,
        }
    } else {
        let accuracy = (100.0 - distance).max(10.0);
        DropScore {
            distance,
            accuracy,
            points: (accuracy / 2.0).round() as u32,
            perfect: false,
        }
    }
}

/// Discount earned by a finished session, clamped to `min..=max`
/// (inverted bounds resolve to `max`).
///
/// 30% of the score percentage plus up to 20 points for perfect drops.
pub fn compute_reward(score: u32, perfect_count: u32, stage_count: usize, min: u8, max: u8) -> u8 {
    if stage_count == 0 {
        return min.min(max);
    }
    let stages = stage_count as f64;
    let max_score = stages * MAX_POINTS_PER_STAGE as f64;
    let score_pct = score as f64 / max_score * 100.0;
    let perfect_bonus = perfect_count as f64 / stages * 20.0;

    let raw = (score_pct * 0.3 + perfect_bonus).round() as i64;
    raw.max(min as i64).min(max as i64) as u8
}

/// Visual rating of a stacked item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyGrade {
    /// Above 80%
    Bullseye,
    /// Above 50%
    Good,
    Sloppy,
}

impl AccuracyGrade {
    pub fn from_accuracy(accuracy: u8) -> Self {
        match accuracy {
            81.. => AccuracyGrade::Bullseye,
            51..=80 => AccuracyGrade::Good,
            _ => AccuracyGrade::Sloppy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccuracyGrade::Bullseye => "Bullseye",
            AccuracyGrade::Good => "Good",
            AccuracyGrade::Sloppy => "Sloppy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_zone() {
        for distance in [0.0, 12.5, 40.0] {
            let score = score_drop(distance, 40.0, 80.0);
            assert!(score.perfect);
            assert_eq!(score.accuracy_pct(), 100);
            assert_eq!(score.points, 100);
        }
    }

    #[test]
    fn test_just_outside_perfect_zone() {
        let score = score_drop(41.0, 40.0, 80.0);
        assert!(!score.perfect);
        assert_eq!(score.accuracy_pct(), 98);
        assert_eq!(score.points, 98);
    }

    #[test]
    fn test_good_zone_boundary_is_inclusive() {
        // 100 - 2 * 40 = 20, floored to 50
        let score = score_drop(80.0, 40.0, 80.0);
        assert_eq!(score.accuracy_pct(), 50);
        assert_eq!(score.points, 50);

        // Just past it falls into the far tier: 100 - 81 = 19, halved
        let far = score_drop(81.0, 40.0, 80.0);
        assert_eq!(far.accuracy_pct(), 19);
        assert_eq!(far.points, 10);
    }

    #[test]
    fn test_far_tier_floor() {
        let score = score_drop(120.0, 40.0, 80.0);
        assert_eq!(score.accuracy_pct(), 10);
        assert_eq!(score.points, 5);
    }

    #[test]
    fn test_negative_distance_is_absolute() {
        assert_eq!(score_drop(-41.0, 40.0, 80.0), score_drop(41.0, 40.0, 80.0));
    }

    #[test]
    fn test_reward_all_perfect() {
        assert_eq!(compute_reward(800, 8, 8, 5, 50), 50);
    }

    #[test]
    fn test_reward_floor() {
        assert_eq!(compute_reward(40, 0, 8, 5, 50), 5);
        assert_eq!(compute_reward(0, 0, 8, 5, 50), 5);
    }

    #[test]
    fn test_reward_mid_range() {
        // 90% * 0.3 = 27, no perfect bonus
        assert_eq!(compute_reward(720, 0, 8, 5, 50), 27);
        // 50% * 0.3 = 15, plus 2/8 * 20 = 5
        assert_eq!(compute_reward(400, 2, 8, 5, 50), 20);
    }

    #[test]
    fn test_reward_inverted_bounds() {
        assert_eq!(compute_reward(800, 8, 8, 60, 50), 50);
        assert_eq!(compute_reward(0, 0, 8, 60, 50), 50);
    }

    #[test]
    fn test_reward_without_stages() {
        assert_eq!(compute_reward(0, 0, 0, 5, 50), 5);
    }

    #[test]
    fn test_grades() {
        assert_eq!(AccuracyGrade::from_accuracy(100), AccuracyGrade::Bullseye);
        assert_eq!(AccuracyGrade::from_accuracy(81), AccuracyGrade::Bullseye);
        assert_eq!(AccuracyGrade::from_accuracy(80), AccuracyGrade::Good);
        assert_eq!(AccuracyGrade::from_accuracy(51), AccuracyGrade::Good);
        assert_eq!(AccuracyGrade::from_accuracy(50), AccuracyGrade::Sloppy);
        assert_eq!(AccuracyGrade::from_accuracy(10), AccuracyGrade::Sloppy);
    }
}
