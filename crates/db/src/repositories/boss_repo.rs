//! Repository for the `bosses` table.

use sqlx::{PgConnection, PgPool};

use edura_core::types::DbId;

use crate::models::battle::Boss;

/// Column list for `bosses` queries.
const COLUMNS: &str = "id, name, level, rewards";

/// Static boss definitions, seeded by migration.
pub struct BossRepo;

impl BossRepo {
    /// Get a boss definition by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Boss>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bosses WHERE id = $1");
        sqlx::query_as::<_, Boss>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get a boss definition on an existing transaction's connection.
    pub async fn get_in_tx(conn: &mut PgConnection, id: DbId) -> Result<Option<Boss>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bosses WHERE id = $1");
        sqlx::query_as::<_, Boss>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List all bosses, easiest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Boss>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bosses ORDER BY level, id");
        sqlx::query_as::<_, Boss>(&query).fetch_all(pool).await
    }
}
