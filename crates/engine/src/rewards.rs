//! Reward bundle application.

use sqlx::PgConnection;

use edura_core::reward::RewardBundle;
use edura_core::types::DbId;
use edura_db::repositories::{MascotItemRepo, MascotRepo};

/// Applies a reward bundle to a mascot, all-or-nothing.
///
/// Runs entirely inside the caller's transaction: if any sub-step fails the
/// transaction aborts and nothing was paid out. Partial application is a bug
/// class this design eliminates.
pub struct RewardDistributor;

impl RewardDistributor {
    /// Apply every part of `bundle` to the given mascot.
    pub async fn apply_in_tx(
        conn: &mut PgConnection,
        mascot_id: DbId,
        bundle: &RewardBundle,
    ) -> Result<(), sqlx::Error> {
        for item in &bundle.items {
            MascotItemRepo::add_in_tx(conn, mascot_id, item.item_id, item.quantity).await?;
        }

        if let Some(crystals) = bundle.crystals {
            MascotRepo::add_crystals_in_tx(conn, mascot_id, crystals).await?;
        }

        for unlock in &bundle.unlocks {
            // No owning subsystem yet; the unlock is recorded in the boss
            // definition and logged here until one exists.
            tracing::info!(mascot_id, unlock = %unlock, "Unlock earned; delivery pending the unlocks subsystem");
        }

        Ok(())
    }
}
