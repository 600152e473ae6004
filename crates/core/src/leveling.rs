//! Mascot leveling math and bounded counters.
//!
//! The leveling curve and the carry-over loop are the replayable heart of
//! mascot progression: the same total experience always lands on the same
//! (level, experience) pair regardless of how it was split across calls.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Lower bound for mood and energy.
pub const COUNTER_MIN: i32 = 0;
/// Upper bound for mood and energy.
pub const COUNTER_MAX: i32 = 100;

/// Base experience cost of the level 1 -> 2 step.
pub const BASE_LEVEL_COST: f64 = 100.0;

// ---------------------------------------------------------------------------
// Curve
// ---------------------------------------------------------------------------

/// Experience required to advance from `level` to `level + 1`.
///
/// Formula: `floor(100 * level^1.5)`. Levels below 1 are treated as 1.
pub fn experience_to_next(level: i32) -> i64 {
    (BASE_LEVEL_COST * f64::from(level.max(1)).powf(1.5)).floor() as i64
}

/// Result of applying an experience gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level: i32,
    /// Leftover experience, always below `experience_to_next(level)`.
    pub experience: i64,
    pub levels_gained: i32,
}

/// Apply an experience gain, carrying overflow across level boundaries.
///
/// `amount` must be non-negative (the service layer rejects negatives before
/// calling in). Runs in O(levels gained): large boss payouts may cross
/// several levels in one call.
pub fn apply_experience(level: i32, experience: i64, amount: i64) -> LevelProgress {
    let mut level = level.max(1);
    let mut experience = experience.max(0) + amount.max(0);
    let mut levels_gained = 0;

    while experience >= experience_to_next(level) {
        experience -= experience_to_next(level);
        level += 1;
        levels_gained += 1;
    }

    LevelProgress {
        level,
        experience,
        levels_gained,
    }
}

/// Clamp a bounded counter (mood, energy) after applying a delta.
pub fn clamp_counter(current: i32, delta: i32) -> i32 {
    current
        .saturating_add(delta)
        .clamp(COUNTER_MIN, COUNTER_MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
