//! Achievement granting: evaluate-all, grant-at-most-once.

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use edura_core::activity::{is_known_event_type, STREAK_QUALIFYING_EVENTS};
use edura_core::activity::{EVENT_COMMENT_POSTED, EVENT_COURSE_COMPLETED, EVENT_LESSON_COMPLETED};
use edura_core::error::CoreError;
use edura_core::requirement::{self, ActivityHistory, Requirement};
use edura_core::types::DbId;
use edura_db::models::achievement::{Achievement, UserAchievement};
use edura_db::repositories::{AchievementRepo, ActivityRepo, NotificationRepo, UserAchievementRepo};
use edura_events::{EngineEvent, EventBus};

use crate::error::EngineError;

/// A freshly created grant, returned to the caller for immediate UI feedback.
#[derive(Debug, Clone, Serialize)]
pub struct GrantedAchievement {
    pub achievement: Achievement,
    pub grant: UserAchievement,
}

/// Orchestrates requirement evaluation and idempotent granting for one
/// inbound domain event.
pub struct AchievementGranter;

impl AchievementGranter {
    /// Handle an inbound domain event for a user.
    ///
    /// Appends the event to the activity log, evaluates every achievement
    /// reacting to its type (plus wildcards) against the user's history, and
    /// grants the satisfied ones. Grants are idempotent: the unique
    /// constraint on (user, achievement) absorbs concurrent duplicate
    /// triggers, and an already-granted achievement is a silent no-op.
    ///
    /// A malformed requirement descriptor is logged and skipped; it never
    /// blocks sibling achievements in the same batch.
    pub async fn on_event(
        pool: &PgPool,
        bus: &EventBus,
        user_id: DbId,
        event_type: &str,
        payload: serde_json::Value,
    ) -> Result<Vec<GrantedAchievement>, EngineError> {
        if !is_known_event_type(event_type) {
            return Err(CoreError::Validation(format!("Unknown event type: {event_type}")).into());
        }

        ActivityRepo::record(pool, user_id, event_type, &payload).await?;

        let candidates = AchievementRepo::list_for_event_type(pool, event_type).await?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let history = Self::load_history(pool, user_id).await?;
        let today = Utc::now().date_naive();

        let mut granted = Vec::new();
        for achievement in candidates {
            let req: Requirement = match serde_json::from_value(achievement.requirement.clone()) {
                Ok(req) => req,
                Err(e) => {
                    tracing::warn!(
                        achievement_id = achievement.id,
                        error = %e,
                        "Malformed requirement descriptor; skipping achievement"
                    );
                    continue;
                }
            };

            let eval = requirement::evaluate(&req, &history, today);
            if !eval.satisfied {
                continue;
            }

            let Some(grant) = UserAchievementRepo::try_grant(pool, user_id, achievement.id).await?
            else {
                // Already granted; the constraint did its job.
                continue;
            };

            tracing::info!(
                user_id,
                achievement_id = achievement.id,
                name = %achievement.name,
                "Achievement unlocked"
            );

            NotificationRepo::create(
                pool,
                user_id,
                "Conquista desbloqueada!",
                &format!("Você desbloqueou \"{}\" (+{} pontos)", achievement.name, achievement.points),
            )
            .await?;

            bus.publish(EngineEvent::AchievementUnlocked {
                user_id,
                achievement_id: achievement.id,
                name: achievement.name.clone(),
                points: achievement.points,
                unlocked_at: grant.unlocked_at,
            });

            granted.push(GrantedAchievement { achievement, grant });
        }

        Ok(granted)
    }

    /// Assemble one history snapshot for the whole evaluation batch.
    async fn load_history(pool: &PgPool, user_id: DbId) -> Result<ActivityHistory, EngineError> {
        let streak_events =
            ActivityRepo::timestamps_for(pool, user_id, STREAK_QUALIFYING_EVENTS).await?;
        let comments = ActivityRepo::count_for(pool, user_id, EVENT_COMMENT_POSTED).await?;
        let lessons = ActivityRepo::count_for(pool, user_id, EVENT_LESSON_COMPLETED).await?;
        let completed_courses =
            ActivityRepo::count_for(pool, user_id, EVENT_COURSE_COMPLETED).await?;

        Ok(ActivityHistory {
            streak_events,
            completed_courses: completed_courses.max(0) as u64,
            comments: comments.max(0) as u64,
            lessons: lessons.max(0) as u64,
            // Populated once the quiz subsystem reports scores.
            best_quiz_score: None,
        })
    }
}
