//! Boss battle lifecycle: NONE → ACTIVE → { VICTORY, ABANDONED }.
//!
//! The service owns the transaction boundaries. A victory pays out the full
//! reward bundle, the experience grant and the notification in the same
//! transaction that completes the battle, so a payout can never be observed
//! half-applied.

use serde::Serialize;
use sqlx::PgPool;

use edura_core::battle::{
    apply_progress, consolation_experience, victory_experience, BattleOutcome, ProgressOutcome,
    BATTLE_ENERGY_COST, MIN_BATTLE_ENERGY, VICTORY_PROGRESS,
};
use edura_core::error::CoreError;
use edura_core::leveling;
use edura_core::reward::RewardBundle;
use edura_core::types::DbId;
use edura_db::models::battle::BossBattle;
use edura_db::models::mascot::Mascot;
use edura_db::repositories::{BattleRepo, BossRepo, MascotRepo, NotificationRepo};
use edura_events::{EngineEvent, EventBus};

use crate::error::{is_unique_violation, EngineError};
use crate::rewards::RewardDistributor;

/// Name of the partial unique index backing the one-active-battle invariant.
const ACTIVE_BATTLE_INDEX: &str = "uq_boss_battles_one_active";

/// Result of starting a battle.
#[derive(Debug, Clone, Serialize)]
pub struct BattleStarted {
    pub battle: BossBattle,
    /// Mascot state after the energy debit.
    pub mascot: Mascot,
}

/// Result of a progress increment.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BattleProgressResult {
    /// Battle continues; progress below 100.
    Ongoing { battle: BossBattle },
    /// Progress reached 100: battle won and rewards paid out.
    Victory {
        battle: BossBattle,
        mascot: Mascot,
        rewards: RewardBundle,
    },
}

/// Result of abandoning a battle.
#[derive(Debug, Clone, Serialize)]
pub struct BattleAbandonResult {
    pub battle: BossBattle,
    pub mascot: Mascot,
    pub consolation_experience: i64,
}

/// The boss battle state machine.
pub struct BattleService;

impl BattleService {
    /// Start a battle against a boss (NONE → ACTIVE).
    ///
    /// Preconditions: no active battle for this user, and mascot energy of
    /// at least [`MIN_BATTLE_ENERGY`]. The energy debit and the battle
    /// insert commit together; a concurrent duplicate start aborts on the
    /// partial unique index, leaving energy untouched.
    pub async fn start(
        pool: &PgPool,
        user_id: DbId,
        boss_id: DbId,
    ) -> Result<BattleStarted, EngineError> {
        let boss = BossRepo::get(pool, boss_id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Boss", id: boss_id })?;

        if BattleRepo::find_active(pool, user_id).await?.is_some() {
            return Err(CoreError::Conflict(
                "An active battle is already in progress".to_string(),
            )
            .into());
        }

        // Create lazily so a brand-new user can fight immediately.
        MascotRepo::get_or_create(pool, user_id).await?;

        let mut tx = pool.begin().await?;

        let mascot = MascotRepo::lock_by_user(&mut *tx, user_id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Mascot", id: user_id })?;

        // Checked under the row lock: a concurrent debit cannot sneak in
        // between the check and the debit below.
        if mascot.energy < MIN_BATTLE_ENERGY {
            return Err(CoreError::InsufficientEnergy {
                current: mascot.energy,
                required: MIN_BATTLE_ENERGY,
            }
            .into());
        }

        let mascot = MascotRepo::adjust_energy_in_tx(&mut *tx, user_id, -BATTLE_ENERGY_COST)
            .await?
            .ok_or(CoreError::NotFound { entity: "Mascot", id: user_id })?;

        let battle = match BattleRepo::create(&mut *tx, user_id, boss.id).await {
            Ok(battle) => battle,
            // Lost the race for the active slot; the tx aborts, so the
            // energy debit never lands.
            Err(e) if is_unique_violation(&e, ACTIVE_BATTLE_INDEX) => {
                return Err(CoreError::Conflict(
                    "An active battle is already in progress".to_string(),
                )
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;

        tracing::info!(user_id, boss_id, battle_id = battle.id, "Battle started");
        Ok(BattleStarted { battle, mascot })
    }

    /// Apply a progress increment (ACTIVE → ACTIVE or ACTIVE → VICTORY).
    ///
    /// The battle row stays locked for the read-modify-write, so two
    /// concurrent increments serialize and both count.
    pub async fn progress(
        pool: &PgPool,
        bus: &EventBus,
        user_id: DbId,
        battle_id: DbId,
        increment: i32,
    ) -> Result<BattleProgressResult, EngineError> {
        if increment < 1 {
            return Err(
                CoreError::Validation(format!("Progress increment must be >= 1, got {increment}"))
                    .into(),
            );
        }

        let mut tx = pool.begin().await?;

        let battle = BattleRepo::lock_for_user(&mut *tx, battle_id, user_id)
            .await?
            .ok_or(CoreError::NotFound { entity: "BossBattle", id: battle_id })?;

        if battle.completed {
            return Err(CoreError::Conflict("Battle is already completed".to_string()).into());
        }

        match apply_progress(battle.progress, increment) {
            ProgressOutcome::InProgress(new_progress) => {
                let battle = BattleRepo::set_progress(&mut *tx, battle.id, new_progress).await?;
                tx.commit().await?;
                Ok(BattleProgressResult::Ongoing { battle })
            }
            ProgressOutcome::Victory => {
                // Read on the tx connection; the whole victory path must
                // work with the single connection already held.
                let boss = BossRepo::get_in_tx(&mut *tx, battle.boss_id)
                    .await?
                    .ok_or(CoreError::NotFound { entity: "Boss", id: battle.boss_id })?;
                let rewards = boss.reward_bundle();

                let battle = BattleRepo::complete(
                    &mut *tx,
                    battle.id,
                    BattleOutcome::Victory.as_str(),
                    VICTORY_PROGRESS,
                )
                .await?;

                let mascot = MascotRepo::lock_by_user(&mut *tx, user_id).await?.ok_or(
                    // A battle cannot start without a mascot.
                    CoreError::Internal(format!("Mascot missing for battle owner {user_id}")),
                )?;

                RewardDistributor::apply_in_tx(&mut *tx, mascot.id, &rewards).await?;

                let gain = victory_experience(boss.level);
                let progress = leveling::apply_experience(mascot.level, mascot.experience, gain);
                let mascot = MascotRepo::set_progress(
                    &mut *tx,
                    mascot.id,
                    progress.level,
                    progress.experience,
                )
                .await?;

                NotificationRepo::create_in_tx(
                    &mut *tx,
                    user_id,
                    "Vitória!",
                    &format!("Você derrotou {} (+{} XP)", boss.name, gain),
                )
                .await?;

                tx.commit().await?;

                tracing::info!(user_id, battle_id = battle.id, boss_id = boss.id, "Battle won");
                bus.publish(EngineEvent::BattleWon {
                    user_id,
                    battle_id: battle.id,
                    boss_id: boss.id,
                });
                if progress.levels_gained > 0 {
                    bus.publish(EngineEvent::LevelUp {
                        user_id,
                        level: progress.level,
                        levels_gained: progress.levels_gained,
                    });
                }

                Ok(BattleProgressResult::Victory { battle, mascot, rewards })
            }
        }
    }

    /// Abandon an active battle (ACTIVE → ABANDONED).
    ///
    /// User-initiated cancellation with a defined outcome: no reward bundle,
    /// but half the accumulated progress is paid as consolation experience.
    pub async fn abandon(
        pool: &PgPool,
        bus: &EventBus,
        user_id: DbId,
        battle_id: DbId,
    ) -> Result<BattleAbandonResult, EngineError> {
        let mut tx = pool.begin().await?;

        let battle = BattleRepo::lock_for_user(&mut *tx, battle_id, user_id)
            .await?
            .ok_or(CoreError::NotFound { entity: "BossBattle", id: battle_id })?;

        if battle.completed {
            return Err(CoreError::Conflict("Battle is already completed".to_string()).into());
        }

        let battle = BattleRepo::complete(
            &mut *tx,
            battle.id,
            BattleOutcome::Abandoned.as_str(),
            battle.progress,
        )
        .await?;

        let consolation = consolation_experience(battle.progress);

        let mascot = MascotRepo::lock_by_user(&mut *tx, user_id).await?.ok_or(
            CoreError::Internal(format!("Mascot missing for battle owner {user_id}")),
        )?;
        let progress = leveling::apply_experience(mascot.level, mascot.experience, consolation);
        let mascot =
            MascotRepo::set_progress(&mut *tx, mascot.id, progress.level, progress.experience)
                .await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            battle_id = battle.id,
            progress = battle.progress,
            "Battle abandoned"
        );
        bus.publish(EngineEvent::BattleAbandoned {
            user_id,
            battle_id: battle.id,
            progress: battle.progress,
        });

        Ok(BattleAbandonResult {
            battle,
            mascot,
            consolation_experience: consolation,
        })
    }

    /// The user's active battle, if any.
    pub async fn active(pool: &PgPool, user_id: DbId) -> Result<Option<BossBattle>, EngineError> {
        Ok(BattleRepo::find_active(pool, user_id).await?)
    }

    /// The user's battle history, most recent first.
    pub async fn history(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<BossBattle>, EngineError> {
        Ok(BattleRepo::history_for_user(pool, user_id, limit).await?)
    }
}
