//! Canonical activity event type identifiers.
//!
//! The activity log is the engine's read model for requirement evaluation:
//! every inbound platform action (study session, lesson completion, comment,
//! rating, course completion) is appended under one of these type strings.

/// A completed study session.
pub const EVENT_STUDY_SESSION: &str = "study_session";

/// A lesson marked as completed.
pub const EVENT_LESSON_COMPLETED: &str = "lesson_completed";

/// A comment posted on a lesson or course.
pub const EVENT_COMMENT_POSTED: &str = "comment_posted";

/// A rating submitted for a course.
pub const EVENT_RATING_SUBMITTED: &str = "rating_submitted";

/// An enrollment completed (all lessons finished).
pub const EVENT_COURSE_COMPLETED: &str = "course_completed";

/// Wildcard achievement type: evaluated for every inbound event.
pub const EVENT_TYPE_ALL: &str = "all";

/// Event types that count towards a daily study streak.
///
/// Both active study sessions and lesson completions keep a streak alive;
/// passive actions (comments, ratings) do not.
pub const STREAK_QUALIFYING_EVENTS: &[&str] = &[EVENT_STUDY_SESSION, EVENT_LESSON_COMPLETED];

/// All event types the engine understands, for inbound validation.
pub const KNOWN_EVENT_TYPES: &[&str] = &[
    EVENT_STUDY_SESSION,
    EVENT_LESSON_COMPLETED,
    EVENT_COMMENT_POSTED,
    EVENT_RATING_SUBMITTED,
    EVENT_COURSE_COMPLETED,
];

/// Whether `event_type` is one of the canonical activity types.
pub fn is_known_event_type(event_type: &str) -> bool {
    KNOWN_EVENT_TYPES.contains(&event_type)
}
