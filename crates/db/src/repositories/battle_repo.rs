//! Repository for the `boss_battles` table.

use sqlx::{PgConnection, PgPool};

use edura_core::types::DbId;

use crate::models::battle::BossBattle;

/// Column list for `boss_battles` queries.
const COLUMNS: &str = "id, user_id, boss_id, progress, completed, outcome, started_at, completed_at";

/// Battle records. The partial unique index `uq_boss_battles_one_active`
/// backs the one-active-battle-per-user invariant under concurrent starts.
pub struct BattleRepo;

impl BattleRepo {
    /// Create an active battle at progress 0.
    ///
    /// A concurrent duplicate start surfaces as a 23505 on the partial
    /// unique index; the service maps it to a conflict.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        boss_id: DbId,
    ) -> Result<BossBattle, sqlx::Error> {
        let query = format!(
            "INSERT INTO boss_battles (user_id, boss_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BossBattle>(&query)
            .bind(user_id)
            .bind(boss_id)
            .fetch_one(conn)
            .await
    }

    /// The user's active battle, if any.
    pub async fn find_active(pool: &PgPool, user_id: DbId) -> Result<Option<BossBattle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boss_battles WHERE user_id = $1 AND NOT completed");
        sqlx::query_as::<_, BossBattle>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a battle only if it belongs to the given user.
    pub async fn get_for_user(
        pool: &PgPool,
        battle_id: DbId,
        user_id: DbId,
    ) -> Result<Option<BossBattle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boss_battles WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, BossBattle>(&query)
            .bind(battle_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Lock a user's battle row for the duration of the transaction.
    ///
    /// Two concurrent progress calls serialize here, so neither can observe
    /// the other's pre-increment value.
    pub async fn lock_for_user(
        conn: &mut PgConnection,
        battle_id: DbId,
        user_id: DbId,
    ) -> Result<Option<BossBattle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM boss_battles WHERE id = $1 AND user_id = $2 FOR UPDATE"
        );
        sqlx::query_as::<_, BossBattle>(&query)
            .bind(battle_id)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Persist a non-terminal progress value. Caller holds the row lock.
    pub async fn set_progress(
        conn: &mut PgConnection,
        battle_id: DbId,
        progress: i32,
    ) -> Result<BossBattle, sqlx::Error> {
        let query = format!(
            "UPDATE boss_battles SET progress = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BossBattle>(&query)
            .bind(battle_id)
            .bind(progress)
            .fetch_one(conn)
            .await
    }

    /// Terminal transition: stamp outcome, final progress and completion time.
    pub async fn complete(
        conn: &mut PgConnection,
        battle_id: DbId,
        outcome: &str,
        final_progress: i32,
    ) -> Result<BossBattle, sqlx::Error> {
        let query = format!(
            "UPDATE boss_battles \
             SET completed = TRUE, outcome = $2, progress = $3, completed_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BossBattle>(&query)
            .bind(battle_id)
            .bind(outcome)
            .bind(final_progress)
            .fetch_one(conn)
            .await
    }

    /// A user's battle history, most recent first.
    pub async fn history_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<BossBattle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM boss_battles \
             WHERE user_id = $1 \
             ORDER BY started_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, BossBattle>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
