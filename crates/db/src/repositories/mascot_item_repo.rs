//! Repository for the `mascot_items` table.

use sqlx::{PgConnection, PgPool};

use edura_core::types::DbId;

use crate::models::mascot::MascotItem;

/// Column list for `mascot_items` queries.
const COLUMNS: &str = "id, mascot_id, item_id, quantity, equipped, created_at";

fn add_query() -> String {
    format!(
        "INSERT INTO mascot_items (mascot_id, item_id, quantity) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (mascot_id, item_id) \
         DO UPDATE SET quantity = mascot_items.quantity + EXCLUDED.quantity \
         RETURNING {COLUMNS}"
    )
}

/// Mascot inventory rows: accumulating upserts, never replacements.
pub struct MascotItemRepo;

impl MascotItemRepo {
    /// Add `quantity` of an item, accumulating onto an existing row.
    pub async fn add(
        pool: &PgPool,
        mascot_id: DbId,
        item_id: DbId,
        quantity: i32,
    ) -> Result<MascotItem, sqlx::Error> {
        sqlx::query_as::<_, MascotItem>(&add_query())
            .bind(mascot_id)
            .bind(item_id)
            .bind(quantity)
            .fetch_one(pool)
            .await
    }

    /// [`MascotItemRepo::add`] inside a caller-owned transaction.
    pub async fn add_in_tx(
        conn: &mut PgConnection,
        mascot_id: DbId,
        item_id: DbId,
        quantity: i32,
    ) -> Result<MascotItem, sqlx::Error> {
        sqlx::query_as::<_, MascotItem>(&add_query())
            .bind(mascot_id)
            .bind(item_id)
            .bind(quantity)
            .fetch_one(conn)
            .await
    }

    /// Flip an item's equipped flag.
    ///
    /// Returns `None` when the item is not in this mascot's inventory.
    pub async fn toggle_equip(
        pool: &PgPool,
        mascot_id: DbId,
        item_id: DbId,
    ) -> Result<Option<MascotItem>, sqlx::Error> {
        let query = format!(
            "UPDATE mascot_items SET equipped = NOT equipped \
             WHERE mascot_id = $1 AND item_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MascotItem>(&query)
            .bind(mascot_id)
            .bind(item_id)
            .fetch_optional(pool)
            .await
    }

    /// List a mascot's inventory.
    pub async fn list_for_mascot(
        pool: &PgPool,
        mascot_id: DbId,
    ) -> Result<Vec<MascotItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mascot_items WHERE mascot_id = $1 ORDER BY item_id"
        );
        sqlx::query_as::<_, MascotItem>(&query)
            .bind(mascot_id)
            .fetch_all(pool)
            .await
    }
}
