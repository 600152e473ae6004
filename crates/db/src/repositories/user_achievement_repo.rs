//! Repository for the `user_achievements` table.

use sqlx::PgPool;

use edura_core::types::DbId;

use crate::models::achievement::UserAchievement;

/// Column list for `user_achievements` queries.
const COLUMNS: &str = "id, user_id, achievement_id, unlocked_at";

/// Grant records. The storage layer enforces the at-most-once guarantee.
pub struct UserAchievementRepo;

impl UserAchievementRepo {
    /// Idempotent grant: insert, ignoring a duplicate.
    ///
    /// Returns `Some(record)` when this call created the grant and `None`
    /// when the (user, achievement) pair already existed. Relies on the
    /// unique constraint, not a prior read, so concurrent duplicate
    /// triggers cannot both grant.
    pub async fn try_grant(
        pool: &PgPool,
        user_id: DbId,
        achievement_id: DbId,
    ) -> Result<Option<UserAchievement>, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_achievements (user_id, achievement_id) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id, achievement_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserAchievement>(&query)
            .bind(user_id)
            .bind(achievement_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's grants, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserAchievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_achievements \
             WHERE user_id = $1 \
             ORDER BY unlocked_at DESC, id DESC"
        );
        sqlx::query_as::<_, UserAchievement>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Number of grants a user holds.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_achievements WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
