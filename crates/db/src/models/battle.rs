//! Boss definitions and battle records.

use serde::Serialize;
use sqlx::FromRow;

use edura_core::reward::RewardBundle;
use edura_core::types::{DbId, Timestamp};

/// A row from the `bosses` table: a static boss definition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Boss {
    pub id: DbId,
    pub name: String,
    /// Difficulty level; also scales the victory experience payout.
    pub level: i32,
    pub rewards: serde_json::Value,
}

impl Boss {
    /// Parse the JSONB rewards column into a typed bundle.
    ///
    /// A malformed document yields an empty bundle rather than blocking the
    /// battle from completing.
    pub fn reward_bundle(&self) -> RewardBundle {
        serde_json::from_value(self.rewards.clone()).unwrap_or_else(|e| {
            tracing::warn!(boss_id = self.id, error = %e, "Malformed boss rewards; paying out nothing");
            RewardBundle::default()
        })
    }
}

/// A row from the `boss_battles` table.
///
/// Lifecycle: created active at progress 0, mutated on progress, terminal
/// once `completed` — never reopened.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BossBattle {
    pub id: DbId,
    pub user_id: DbId,
    pub boss_id: DbId,
    pub progress: i32,
    pub completed: bool,
    /// `victory` or `abandoned` once completed, `NULL` while active.
    pub outcome: Option<String>,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}
