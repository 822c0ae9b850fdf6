//! The kinship accrual/decay curve implementing [`KinshipCurve`].

use wisp_core::constants::{
    KINSHIP_BASELINE, KINSHIP_DECAY_PER_DAY, KINSHIP_STREAK_BONUS_CAP,
    KINSHIP_STREAK_WINDOW_SECS, SECS_PER_DAY,
};
use wisp_core::traits::KinshipCurve;

/// Streak bonus for a consecutive-interaction streak of `streak` length.
///
/// Grows one point per streak step, capped at
/// [`KINSHIP_STREAK_BONUS_CAP`].
pub fn streak_bonus(streak: u64) -> u64 {
    streak.min(KINSHIP_STREAK_BONUS_CAP)
}

/// Kinship points lost after `idle_secs` without interaction.
///
/// One point per *full* day: partial days cost nothing, so the score is a
/// step function of idle time.
pub fn idle_decay(idle_secs: u64) -> u64 {
    idle_secs / SECS_PER_DAY * KINSHIP_DECAY_PER_DAY
}

/// The production kinship calculator.
///
/// Implements [`KinshipCurve`] with:
/// - linear accrual per lifetime interaction above the claim baseline
/// - a capped streak bonus that expires with the streak window
/// - linear per-day idle decay, floored at zero
#[derive(Debug, Clone, Copy, Default)]
pub struct KinshipEngine;

impl KinshipEngine {
    /// Create a new KinshipEngine.
    pub fn new() -> Self {
        Self
    }
}

impl KinshipCurve for KinshipEngine {
    fn score(&self, interaction_count: u64, streak: u64, idle_secs: u64) -> u64 {
        let bonus = if idle_secs <= KINSHIP_STREAK_WINDOW_SECS {
            streak_bonus(streak)
        } else {
            // The streak survives in storage until the next interaction
            // resets it, but a stale streak is worth nothing.
            0
        };
        let accrued = KINSHIP_BASELINE
            .saturating_add(interaction_count)
            .saturating_add(bonus);
        accrued.saturating_sub(idle_decay(idle_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score(count: u64, streak: u64, idle: u64) -> u64 {
        KinshipEngine::new().score(count, streak, idle)
    }

    // --- baseline and accrual ---

    #[test]
    fn fresh_claim_scores_baseline() {
        assert_eq!(score(0, 0, 0), KINSHIP_BASELINE);
    }

    #[test]
    fn five_quick_interactions() {
        // Burst of five in one sitting: 50 + 5 + streak bonus of 5.
        assert_eq!(score(5, 5, 0), 60);
    }

    #[test]
    fn interaction_strictly_increases_score() {
        // Just before: 3 interactions, streak 3, idle half a day.
        let before = score(3, 3, SECS_PER_DAY / 2);
        // Just after interacting: count and streak up, idle reset.
        let after = score(4, 4, 0);
        assert!(after > before);
    }

    // --- streak expiry ---

    #[test]
    fn streak_bonus_caps() {
        assert_eq!(streak_bonus(3), 3);
        assert_eq!(streak_bonus(200), KINSHIP_STREAK_BONUS_CAP);
    }

    #[test]
    fn stale_streak_is_worthless_before_next_interaction() {
        let fresh = score(5, 5, KINSHIP_STREAK_WINDOW_SECS);
        let stale = score(5, 5, KINSHIP_STREAK_WINDOW_SECS + 1);
        // Crossing the window drops exactly the bonus (same day, no extra decay).
        assert_eq!(fresh - stale, streak_bonus(5));
    }

    #[test]
    fn three_days_idle_costs_streak_and_decay() {
        let engaged = score(5, 5, 0);
        let neglected = score(5, 5, 3 * SECS_PER_DAY);
        assert_eq!(engaged - neglected, streak_bonus(5) + 3 * KINSHIP_DECAY_PER_DAY);
    }

    // --- decay ---

    #[test]
    fn partial_days_cost_nothing() {
        assert_eq!(idle_decay(SECS_PER_DAY - 1), 0);
        assert_eq!(idle_decay(SECS_PER_DAY), KINSHIP_DECAY_PER_DAY);
    }

    #[test]
    fn score_floors_at_zero() {
        assert_eq!(score(0, 0, 400 * SECS_PER_DAY), 0);
    }

    #[test]
    fn dense_burst_beats_spread_interactions() {
        // Same lifetime count; the burst keeps its streak, the spread-out
        // schedule reset it at every sitting.
        let burst = score(120, 120, 0);
        let spread = score(120, 1, 0);
        assert!(burst > spread);
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn non_increasing_in_idle_time(
            count in 0u64..10_000,
            streak in 0u64..10_000,
            idle_a in 0u64..1_000 * SECS_PER_DAY,
            idle_b in 0u64..1_000 * SECS_PER_DAY,
        ) {
            let (lo, hi) = if idle_a <= idle_b { (idle_a, idle_b) } else { (idle_b, idle_a) };
            prop_assert!(score(count, streak, lo) >= score(count, streak, hi));
        }

        #[test]
        fn interacting_beats_waiting(
            count in 0u64..10_000,
            streak in 0u64..10_000,
            idle in 0u64..1_000 * SECS_PER_DAY,
        ) {
            // An interaction bumps the count, extends or resets the streak,
            // and zeroes the idle gap; all three help or are neutral.
            let before = score(count, streak, idle);
            let streak_after = if idle <= KINSHIP_STREAK_WINDOW_SECS { streak + 1 } else { 1 };
            let after = score(count + 1, streak_after, 0);
            prop_assert!(after > before);
        }

        #[test]
        fn never_negative(
            count in 0u64..10_000,
            streak in 0u64..10_000,
            idle in 0u64..10_000 * SECS_PER_DAY,
        ) {
            // u64 return already guarantees it; this pins the floor against
            // accidental wrap-around.
            prop_assert!(score(count, streak, idle) <= KINSHIP_BASELINE + count + KINSHIP_STREAK_BONUS_CAP);
        }
    }
}
