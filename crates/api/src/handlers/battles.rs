//! Handlers for the `/bosses` and `/battles` resources.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use edura_core::types::DbId;
use edura_db::repositories::BossRepo;
use edura_engine::BattleService;

use crate::error::AppResult;
use crate::identity::CallerIdentity;
use crate::state::AppState;

/// Body for `POST /battles`.
#[derive(Debug, Deserialize)]
pub struct StartBattleRequest {
    pub boss_id: DbId,
}

/// Body for `POST /battles/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    /// Progress points to add. Must be >= 1.
    pub increment: i32,
}

/// Query parameters for `GET /battles`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of results. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
}

/// Maximum page size for battle history.
const MAX_LIMIT: i64 = 100;

/// Default page size for battle history.
const DEFAULT_LIMIT: i64 = 20;

/// GET /api/v1/bosses
///
/// List the boss catalogue.
pub async fn list_bosses(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let bosses = BossRepo::list(&state.pool).await?;

    Ok(Json(serde_json::json!({ "data": bosses })))
}

/// POST /api/v1/battles
///
/// Start a battle against a boss. 409 if the user already has an active
/// battle or the mascot's energy is below the entry cost.
pub async fn start_battle(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Json(input): Json<StartBattleRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let started = BattleService::start(&state.pool, caller.user_id, input.boss_id).await?;

    Ok(Json(serde_json::json!({ "data": started })))
}

/// GET /api/v1/battles/active
///
/// The user's active battle, or `null` if there is none.
pub async fn active_battle(
    caller: CallerIdentity,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let battle = BattleService::active(&state.pool, caller.user_id).await?;

    Ok(Json(serde_json::json!({ "data": battle })))
}

/// GET /api/v1/battles
///
/// The user's battle history, most recent first.
pub async fn battle_history(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let battles = BattleService::history(&state.pool, caller.user_id, limit).await?;

    Ok(Json(serde_json::json!({ "data": battles })))
}

/// POST /api/v1/battles/{id}/progress
///
/// Apply a progress increment. Reaching 100 completes the battle as a
/// victory and pays out the boss's reward bundle atomically.
pub async fn record_progress(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Path(battle_id): Path<DbId>,
    Json(input): Json<ProgressRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let result = BattleService::progress(
        &state.pool,
        &state.event_bus,
        caller.user_id,
        battle_id,
        input.increment,
    )
    .await?;

    Ok(Json(serde_json::json!({ "data": result })))
}

/// POST /api/v1/battles/{id}/abandon
///
/// Abandon an active battle. No reward bundle; half the accumulated
/// progress is paid as consolation experience.
pub async fn abandon_battle(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Path(battle_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let result =
        BattleService::abandon(&state.pool, &state.event_bus, caller.user_id, battle_id).await?;

    Ok(Json(serde_json::json!({ "data": result })))
}
