//! Achievement requirement descriptors and their pure evaluator.
//!
//! A [`Requirement`] is the tagged descriptor stored in the `achievements`
//! table; [`evaluate`] maps a descriptor plus a user's [`ActivityHistory`]
//! snapshot to a satisfied/progress result. No side effects: the granter
//! assembles the history, this module only does the math.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// Tagged requirement descriptor, stored as JSONB.
///
/// New kinds are added here (plus an arm in [`evaluate`]) without touching
/// any caller: unrecognised kinds deserialize to [`Requirement::Unknown`]
/// and evaluate as unsatisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// Qualifying events on `days` consecutive calendar days.
    Streak { days: u32 },
    /// At least `count` completed course enrollments.
    CourseCompletion { count: u32 },
    /// Best quiz score of at least `score`. Pending the quiz subsystem.
    QuizMastery { score: u32 },
    /// Social-graph predicate over `count` connections. Pending the social subsystem.
    Social { count: u32 },
    /// At least `count` comments posted.
    CommentCount { count: u32 },
    /// At least `count` lessons completed.
    LessonCount { count: u32 },
    /// Forward-compatibility catch-all for descriptors this build predates.
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// History snapshot
// ---------------------------------------------------------------------------

/// A user's activity history, assembled once per evaluation batch.
#[derive(Debug, Clone, Default)]
pub struct ActivityHistory {
    /// Timestamps of streak-qualifying events, any order.
    pub streak_events: Vec<Timestamp>,
    /// Total completed course enrollments.
    pub completed_courses: u64,
    /// Total comments posted.
    pub comments: u64,
    /// Total lessons completed.
    pub lessons: u64,
    /// Best quiz score, once the quiz subsystem reports one.
    pub best_quiz_score: Option<u32>,
}

// ---------------------------------------------------------------------------
// Evaluation result
// ---------------------------------------------------------------------------

/// Result of evaluating one requirement against one user's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub satisfied: bool,
    /// Completion percentage, always in `0..=100`.
    pub progress: u8,
    /// `true` when the requirement kind is a stub pending another subsystem.
    /// Lets tests and callers tell "not implemented" from "not satisfied".
    pub stubbed: bool,
}

impl Evaluation {
    pub fn satisfied() -> Self {
        Self {
            satisfied: true,
            progress: 100,
            stubbed: false,
        }
    }

    pub fn unsatisfied(progress: u8) -> Self {
        Self {
            satisfied: false,
            progress: progress.min(100),
            stubbed: false,
        }
    }

    pub fn stubbed() -> Self {
        Self {
            satisfied: false,
            progress: 0,
            stubbed: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Evaluate a requirement against a history snapshot.
///
/// `today` anchors streak evaluation so tests are deterministic; callers
/// pass the current UTC date.
pub fn evaluate(requirement: &Requirement, history: &ActivityHistory, today: NaiveDate) -> Evaluation {
    match requirement {
        Requirement::Streak { days } => evaluate_streak(*days, &history.streak_events, today),
        Requirement::CourseCompletion { count } => threshold(history.completed_courses, *count),
        Requirement::CommentCount { count } => threshold(history.comments, *count),
        Requirement::LessonCount { count } => threshold(history.lessons, *count),
        Requirement::QuizMastery { score } => {
            // Pending the quiz subsystem; best_quiz_score is never populated yet.
            match history.best_quiz_score {
                Some(best) => threshold(u64::from(best), *score),
                None => Evaluation::stubbed(),
            }
        }
        Requirement::Social { .. } => Evaluation::stubbed(),
        Requirement::Unknown => {
            tracing::warn!("Unknown requirement kind; evaluating as unsatisfied");
            Evaluation::unsatisfied(0)
        }
    }
}

/// Monotone counter check: satisfied iff `total >= required`.
///
/// A zero threshold is always satisfied and never divides.
fn threshold(total: u64, required: u32) -> Evaluation {
    if required == 0 || total >= u64::from(required) {
        return Evaluation::satisfied();
    }
    let progress = (total * 100 / u64::from(required)).min(100) as u8;
    Evaluation::unsatisfied(progress)
}

/// Streak check: some run of `days` consecutive calendar days, each with at
/// least one qualifying event, ending at-or-before `today`.
///
/// Walk: unique event days sorted descending; a gap of exactly one day
/// extends the current run, anything larger resets it. Progress comes from
/// the longest run seen in the full walk (no early return), so partial
/// progress stays visible even when the most recent run is short.
fn evaluate_streak(days: u32, events: &[Timestamp], today: NaiveDate) -> Evaluation {
    if days == 0 {
        return Evaluation::satisfied();
    }
    if events.is_empty() {
        return Evaluation::unsatisfied(0);
    }

    let mut event_days: Vec<NaiveDate> = events
        .iter()
        .map(|t| t.date_naive())
        .filter(|d| *d <= today)
        .collect();
    event_days.sort_unstable_by(|a, b| b.cmp(a));
    event_days.dedup();

    let mut longest: u32 = 0;
    let mut current: u32 = 0;
    let mut prev: Option<NaiveDate> = None;

    for day in event_days {
        current = match prev {
            None => 1,
            Some(p) if (p - day).num_days() == 1 => current + 1,
            Some(_) => 1,
        };
        longest = longest.max(current);
        prev = Some(day);
    }

    if longest >= days {
        Evaluation::satisfied()
    } else {
        let progress = (u64::from(longest) * 100 / u64::from(days)).min(100) as u8;
        Evaluation::unsatisfied(progress)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
