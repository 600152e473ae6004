//! Boss battle lifecycle constants and pure transition logic.
//!
//! The persistent side (row locks, the one-active-battle index) lives in
//! `edura-db`; this module owns the numbers and the transition decisions so
//! they can be tested without a store.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tuning constants
// ---------------------------------------------------------------------------

/// Energy debited from the mascot when a battle starts.
pub const BATTLE_ENERGY_COST: i32 = 30;

/// Minimum mascot energy required to start a battle.
pub const MIN_BATTLE_ENERGY: i32 = 30;

/// Progress value at which a battle is won.
pub const VICTORY_PROGRESS: i32 = 100;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Terminal outcome of a completed battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Abandoned,
}

impl BattleOutcome {
    /// Stable string stored in the `boss_battles.outcome` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Victory => "victory",
            Self::Abandoned => "abandoned",
        }
    }
}

/// Result of applying a progress increment to an active battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressOutcome {
    /// Battle continues at the new progress value (always `< 100`).
    InProgress(i32),
    /// Progress reached or passed 100: the battle is won.
    Victory,
}

/// Resolve a progress increment against the current progress.
pub fn apply_progress(current: i32, increment: i32) -> ProgressOutcome {
    let new_progress = current.saturating_add(increment.max(0));
    if new_progress >= VICTORY_PROGRESS {
        ProgressOutcome::Victory
    } else {
        ProgressOutcome::InProgress(new_progress)
    }
}

// ---------------------------------------------------------------------------
// Payouts
// ---------------------------------------------------------------------------

/// Experience granted for defeating a boss of the given difficulty level.
pub fn victory_experience(boss_level: i32) -> i64 {
    i64::from(boss_level.max(0)) * 100
}

/// Consolation experience for abandoning a battle at the given progress.
///
/// Half the progress, floored.
pub fn consolation_experience(progress: i32) -> i64 {
    (f64::from(progress.max(0)) * 0.5).floor() as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- apply_progress --

    #[test]
    fn progress_accumulates_below_victory() {
        assert_eq!(apply_progress(0, 25), ProgressOutcome::InProgress(25));
        assert_eq!(apply_progress(25, 40), ProgressOutcome::InProgress(65));
    }

    #[test]
    fn progress_at_exactly_100_is_victory() {
        assert_eq!(apply_progress(60, 40), ProgressOutcome::Victory);
    }

    #[test]
    fn progress_past_100_is_victory() {
        assert_eq!(apply_progress(99, 50), ProgressOutcome::Victory);
    }

    #[test]
    fn one_below_victory_stays_active() {
        assert_eq!(apply_progress(99, 0), ProgressOutcome::InProgress(99));
    }

    #[test]
    fn negative_increment_is_ignored() {
        assert_eq!(apply_progress(40, -10), ProgressOutcome::InProgress(40));
    }

    // -- payouts --

    #[test]
    fn victory_experience_scales_with_boss_level() {
        assert_eq!(victory_experience(1), 100);
        assert_eq!(victory_experience(5), 500);
    }

    #[test]
    fn victory_experience_never_negative() {
        assert_eq!(victory_experience(-2), 0);
    }

    #[test]
    fn consolation_is_half_progress_floored() {
        assert_eq!(consolation_experience(0), 0);
        assert_eq!(consolation_experience(45), 22);
        assert_eq!(consolation_experience(99), 49);
    }

    // -- outcome labels --

    #[test]
    fn outcome_strings_are_stable() {
        assert_eq!(BattleOutcome::Victory.as_str(), "victory");
        assert_eq!(BattleOutcome::Abandoned.as_str(), "abandoned");
    }
}
