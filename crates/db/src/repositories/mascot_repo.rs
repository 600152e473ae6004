//! Repository for the `mascots` table.

use sqlx::{PgConnection, PgPool};

use edura_core::types::DbId;

use crate::models::mascot::Mascot;

/// Column list for `mascots` queries.
const COLUMNS: &str =
    "id, user_id, level, experience, mood, energy, crystals, last_interaction, created_at";

/// Per-user mascot rows. All writes go through `MascotService`.
pub struct MascotRepo;

impl MascotRepo {
    /// Fetch the user's mascot, creating it on first access.
    ///
    /// A single upsert round-trip: the no-op `DO UPDATE` makes `RETURNING`
    /// yield the row on conflict too, so concurrent first accesses both get
    /// the same mascot without a read-then-create race.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<Mascot, sqlx::Error> {
        let query = format!(
            "INSERT INTO mascots (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mascot>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Fetch the user's mascot without creating it.
    pub async fn get_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Mascot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mascots WHERE user_id = $1");
        sqlx::query_as::<_, Mascot>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Lock the user's mascot row for the duration of the transaction.
    ///
    /// Serializes concurrent read-modify-write sequences (leveling loop,
    /// battle energy debit) on the same mascot.
    pub async fn lock_by_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Option<Mascot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mascots WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, Mascot>(&query)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Persist the outcome of a leveling loop. Caller holds the row lock.
    pub async fn set_progress(
        conn: &mut PgConnection,
        mascot_id: DbId,
        level: i32,
        experience: i64,
    ) -> Result<Mascot, sqlx::Error> {
        let query = format!(
            "UPDATE mascots \
             SET level = $2, experience = $3, last_interaction = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mascot>(&query)
            .bind(mascot_id)
            .bind(level)
            .bind(experience)
            .fetch_one(conn)
            .await
    }

    /// Atomically apply a mood delta, clamped to `[0, 100]` in SQL.
    ///
    /// Single-statement read-modify-write: two concurrent deltas serialize
    /// on the row and both apply.
    pub async fn adjust_mood(
        pool: &PgPool,
        user_id: DbId,
        delta: i32,
    ) -> Result<Option<Mascot>, sqlx::Error> {
        let query = format!(
            "UPDATE mascots \
             SET mood = LEAST(100, GREATEST(0, mood + $2)), last_interaction = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mascot>(&query)
            .bind(user_id)
            .bind(delta)
            .fetch_optional(pool)
            .await
    }

    /// Atomically apply an energy delta, clamped to `[0, 100]` in SQL.
    pub async fn adjust_energy(
        pool: &PgPool,
        user_id: DbId,
        delta: i32,
    ) -> Result<Option<Mascot>, sqlx::Error> {
        let query = format!(
            "UPDATE mascots \
             SET energy = LEAST(100, GREATEST(0, energy + $2)), last_interaction = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mascot>(&query)
            .bind(user_id)
            .bind(delta)
            .fetch_optional(pool)
            .await
    }

    /// Energy debit/credit inside a transaction (battle start, recovery).
    pub async fn adjust_energy_in_tx(
        conn: &mut PgConnection,
        user_id: DbId,
        delta: i32,
    ) -> Result<Option<Mascot>, sqlx::Error> {
        let query = format!(
            "UPDATE mascots \
             SET energy = LEAST(100, GREATEST(0, energy + $2)), last_interaction = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mascot>(&query)
            .bind(user_id)
            .bind(delta)
            .fetch_optional(conn)
            .await
    }

    /// Credit crystals inside a transaction (reward payout).
    pub async fn add_crystals_in_tx(
        conn: &mut PgConnection,
        mascot_id: DbId,
        amount: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE mascots SET crystals = crystals + $2 WHERE id = $1")
            .bind(mascot_id)
            .bind(amount)
            .execute(conn)
            .await?;
        Ok(())
    }
}
