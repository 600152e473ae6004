//! Repository for the `achievements` table.

use sqlx::PgPool;

use edura_core::activity::EVENT_TYPE_ALL;
use edura_core::types::DbId;

use crate::models::achievement::{Achievement, CreateAchievement};

/// Column list for `achievements` queries.
const COLUMNS: &str = "id, event_type, name, description, icon, points, requirement, created_at";

/// Read operations plus administrative creation for achievements.
pub struct AchievementRepo;

impl AchievementRepo {
    /// Create an achievement definition (administrative path).
    pub async fn create(pool: &PgPool, input: &CreateAchievement) -> Result<Achievement, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements (event_type, name, description, icon, points, requirement) \
             VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, 0), $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(&input.event_type)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(input.points)
            .bind(&input.requirement)
            .fetch_one(pool)
            .await
    }

    /// Get a single achievement by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievements WHERE id = $1");
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the full achievement catalogue.
    pub async fn list(pool: &PgPool) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievements ORDER BY id");
        sqlx::query_as::<_, Achievement>(&query).fetch_all(pool).await
    }

    /// List achievements reacting to `event_type`, including wildcard rows.
    pub async fn list_for_event_type(
        pool: &PgPool,
        event_type: &str,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements \
             WHERE event_type = $1 OR event_type = $2 \
             ORDER BY id"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(event_type)
            .bind(EVENT_TYPE_ALL)
            .fetch_all(pool)
            .await
    }
}
