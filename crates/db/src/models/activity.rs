//! Activity log models.

use serde::Serialize;
use sqlx::FromRow;

use edura_core::types::{DbId, Timestamp};

/// A row from the append-only `activity_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEvent {
    pub id: DbId,
    pub user_id: DbId,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub occurred_at: Timestamp,
}
