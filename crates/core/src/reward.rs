//! Reward bundle types, stored as JSONB on boss definitions.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// One inventory item granted by a reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardItem {
    pub item_id: DbId,
    pub quantity: i32,
}

/// A structured set of items, currency and unlocks paid out on success.
///
/// Applied all-or-nothing inside the caller's transaction; see
/// `RewardDistributor` in `edura-engine`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewardBundle {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<RewardItem>,
    /// Crystal currency amount, credited to the mascot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crystals: Option<i64>,
    /// Feature/content unlock identifiers. Pending their owning subsystem.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unlocks: Vec<String>,
}

impl RewardBundle {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.crystals.is_none() && self.unlocks.is_empty()
    }
}
