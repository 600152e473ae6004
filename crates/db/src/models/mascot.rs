//! Mascot and inventory models.

use serde::Serialize;
use sqlx::FromRow;

use edura_core::types::{DbId, Timestamp};

/// A row from the `mascots` table.
///
/// Mutated only through `MascotService` operations so the leveling
/// invariant (`experience < experience_to_next(level)`) always holds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mascot {
    pub id: DbId,
    pub user_id: DbId,
    pub level: i32,
    pub experience: i64,
    pub mood: i32,
    pub energy: i32,
    pub crystals: i64,
    pub last_interaction: Timestamp,
    pub created_at: Timestamp,
}

/// A row from the `mascot_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MascotItem {
    pub id: DbId,
    pub mascot_id: DbId,
    pub item_id: DbId,
    pub quantity: i32,
    pub equipped: bool,
    pub created_at: Timestamp,
}
