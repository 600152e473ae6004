//! Mascot progression: leveling, mood/energy, inventory.

use sqlx::PgPool;

use edura_core::error::CoreError;
use edura_core::leveling;
use edura_core::types::DbId;
use edura_db::models::mascot::{Mascot, MascotItem};
use edura_db::repositories::{MascotItemRepo, MascotRepo};
use edura_events::{EngineEvent, EventBus};

use crate::error::EngineError;

/// Owns every mutation of mascot state, so the leveling invariant
/// (`experience < experience_to_next(level)`) holds everywhere.
pub struct MascotService;

impl MascotService {
    /// Fetch the user's mascot, creating it lazily on first access.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<Mascot, EngineError> {
        Ok(MascotRepo::get_or_create(pool, user_id).await?)
    }

    /// Add experience and run the leveling loop.
    ///
    /// Experience never decreases through this path: a negative amount is a
    /// validation error. The row stays locked for the read-modify-write so
    /// concurrent gains serialize instead of double-counting.
    pub async fn add_experience(
        pool: &PgPool,
        bus: &EventBus,
        user_id: DbId,
        amount: i64,
    ) -> Result<Mascot, EngineError> {
        if amount < 0 {
            return Err(
                CoreError::Validation(format!("Experience amount must be >= 0, got {amount}")).into(),
            );
        }

        // Ensure the row exists before trying to lock it.
        MascotRepo::get_or_create(pool, user_id).await?;

        let mut tx = pool.begin().await?;
        let mascot = MascotRepo::lock_by_user(&mut *tx, user_id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Mascot", id: user_id })?;

        let progress = leveling::apply_experience(mascot.level, mascot.experience, amount);
        let updated =
            MascotRepo::set_progress(&mut *tx, mascot.id, progress.level, progress.experience)
                .await?;
        tx.commit().await?;

        if progress.levels_gained > 0 {
            tracing::info!(user_id, level = progress.level, "Mascot leveled up");
            bus.publish(EngineEvent::LevelUp {
                user_id,
                level: progress.level,
                levels_gained: progress.levels_gained,
            });
        }

        Ok(updated)
    }

    /// Apply a mood delta, clamped to `[0, 100]`.
    pub async fn update_mood(pool: &PgPool, user_id: DbId, delta: i32) -> Result<Mascot, EngineError> {
        MascotRepo::get_or_create(pool, user_id).await?;
        let mascot = MascotRepo::adjust_mood(pool, user_id, delta)
            .await?
            .ok_or(CoreError::NotFound { entity: "Mascot", id: user_id })?;
        Ok(mascot)
    }

    /// Apply an energy delta, clamped to `[0, 100]`.
    pub async fn update_energy(
        pool: &PgPool,
        user_id: DbId,
        delta: i32,
    ) -> Result<Mascot, EngineError> {
        MascotRepo::get_or_create(pool, user_id).await?;
        let mascot = MascotRepo::adjust_energy(pool, user_id, delta)
            .await?
            .ok_or(CoreError::NotFound { entity: "Mascot", id: user_id })?;
        Ok(mascot)
    }

    /// Add items to the mascot's inventory; quantities accumulate.
    pub async fn add_item(
        pool: &PgPool,
        user_id: DbId,
        item_id: DbId,
        quantity: i32,
    ) -> Result<MascotItem, EngineError> {
        if quantity <= 0 {
            return Err(
                CoreError::Validation(format!("Item quantity must be > 0, got {quantity}")).into(),
            );
        }
        let mascot = MascotRepo::get_or_create(pool, user_id).await?;
        Ok(MascotItemRepo::add(pool, mascot.id, item_id, quantity).await?)
    }

    /// Flip an inventory item's equipped flag.
    pub async fn toggle_equip(
        pool: &PgPool,
        user_id: DbId,
        item_id: DbId,
    ) -> Result<MascotItem, EngineError> {
        let mascot = MascotRepo::get_or_create(pool, user_id).await?;
        let item = MascotItemRepo::toggle_equip(pool, mascot.id, item_id)
            .await?
            .ok_or(CoreError::NotFound { entity: "MascotItem", id: item_id })?;
        Ok(item)
    }

    /// List the mascot's inventory.
    pub async fn inventory(pool: &PgPool, user_id: DbId) -> Result<Vec<MascotItem>, EngineError> {
        let mascot = MascotRepo::get_or_create(pool, user_id).await?;
        Ok(MascotItemRepo::list_for_mascot(pool, mascot.id).await?)
    }
}
