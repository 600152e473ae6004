//! Achievement and grant-record models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use edura_core::types::{DbId, Timestamp};

/// A row from the `achievements` table.
///
/// `requirement` is a JSONB requirement descriptor; it is parsed into
/// `edura_core::requirement::Requirement` at evaluation time so a malformed
/// row degrades to a skipped achievement instead of a failed query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub event_type: String,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub points: i32,
    pub requirement: serde_json::Value,
    pub created_at: Timestamp,
}

/// A row from the `user_achievements` table. Created exactly once per
/// (user, achievement) pair; never mutated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserAchievement {
    pub id: DbId,
    pub user_id: DbId,
    pub achievement_id: DbId,
    pub unlocked_at: Timestamp,
}

/// DTO for administrative achievement creation.
#[derive(Debug, Deserialize)]
pub struct CreateAchievement {
    pub event_type: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub points: Option<i32>,
    pub requirement: serde_json::Value,
}
