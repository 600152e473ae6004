//! Repository for the append-only `activity_events` table.

use sqlx::PgPool;

use edura_core::types::{DbId, Timestamp};

use crate::models::activity::ActivityEvent;

/// Column list for `activity_events` queries.
const COLUMNS: &str = "id, user_id, event_type, payload, occurred_at";

/// The user-event log. Appended on inbound triggers, read for evaluation.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an event to the log.
    pub async fn record(
        pool: &PgPool,
        user_id: DbId,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<ActivityEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_events (user_id, event_type, payload) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityEvent>(&query)
            .bind(user_id)
            .bind(event_type)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Timestamps of a user's events of the given types, newest first.
    ///
    /// Feeds the streak walk, which expects descending order.
    pub async fn timestamps_for(
        pool: &PgPool,
        user_id: DbId,
        event_types: &[&str],
    ) -> Result<Vec<Timestamp>, sqlx::Error> {
        let types: Vec<String> = event_types.iter().map(|s| s.to_string()).collect();
        sqlx::query_scalar(
            "SELECT occurred_at FROM activity_events \
             WHERE user_id = $1 AND event_type = ANY($2) \
             ORDER BY occurred_at DESC",
        )
        .bind(user_id)
        .bind(&types)
        .fetch_all(pool)
        .await
    }

    /// Total number of a user's events of one type.
    pub async fn count_for(
        pool: &PgPool,
        user_id: DbId,
        event_type: &str,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM activity_events WHERE user_id = $1 AND event_type = $2",
        )
        .bind(user_id)
        .bind(event_type)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
