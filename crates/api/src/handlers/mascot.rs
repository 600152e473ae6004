//! Handlers for the `/mascot` resource.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use edura_core::types::DbId;
use edura_engine::MascotService;

use crate::error::{AppError, AppResult};
use crate::identity::CallerIdentity;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body for `POST /mascot/experience`.
#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    /// Experience points to add. Must be >= 0.
    pub amount: i64,
}

/// Body for `POST /mascot/mood` and `POST /mascot/energy`.
#[derive(Debug, Deserialize)]
pub struct CounterDeltaRequest {
    /// Signed delta; the stored counter clamps to `[0, 100]`.
    pub delta: i32,
}

/// Body for `POST /mascot/items`.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub item_id: DbId,
    /// Number of copies to add. Defaults to 1, must be > 0.
    pub quantity: Option<i32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/mascot
///
/// Fetch the authenticated user's mascot, creating it on first access.
pub async fn get_mascot(
    caller: CallerIdentity,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let mascot = MascotService::get_or_create(&state.pool, caller.user_id).await?;

    Ok(Json(serde_json::json!({ "data": mascot })))
}

/// POST /api/v1/mascot/experience
///
/// Add experience to the mascot; level-ups apply immediately.
pub async fn add_experience(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Json(input): Json<ExperienceRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let mascot =
        MascotService::add_experience(&state.pool, &state.event_bus, caller.user_id, input.amount)
            .await?;

    Ok(Json(serde_json::json!({ "data": mascot })))
}

/// POST /api/v1/mascot/mood
///
/// Apply a mood delta, clamped to `[0, 100]`.
pub async fn update_mood(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Json(input): Json<CounterDeltaRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let mascot = MascotService::update_mood(&state.pool, caller.user_id, input.delta).await?;

    Ok(Json(serde_json::json!({ "data": mascot })))
}

/// POST /api/v1/mascot/energy
///
/// Apply an energy delta, clamped to `[0, 100]`.
pub async fn update_energy(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Json(input): Json<CounterDeltaRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let mascot = MascotService::update_energy(&state.pool, caller.user_id, input.delta).await?;

    Ok(Json(serde_json::json!({ "data": mascot })))
}

/// GET /api/v1/mascot/items
///
/// List the mascot's inventory.
pub async fn list_items(
    caller: CallerIdentity,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let items = MascotService::inventory(&state.pool, caller.user_id).await?;

    Ok(Json(serde_json::json!({ "data": items })))
}

/// POST /api/v1/mascot/items
///
/// Add items to the mascot's inventory; quantities accumulate.
pub async fn add_item(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Json(input): Json<AddItemRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let quantity = input.quantity.unwrap_or(1);
    if quantity <= 0 {
        return Err(AppError::BadRequest(format!(
            "quantity must be > 0, got {quantity}"
        )));
    }

    let item = MascotService::add_item(&state.pool, caller.user_id, input.item_id, quantity).await?;

    Ok(Json(serde_json::json!({ "data": item })))
}

/// POST /api/v1/mascot/items/{item_id}/equip
///
/// Flip an inventory item's equipped flag. 404 if the mascot does not own
/// the item.
pub async fn toggle_equip(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let item = MascotService::toggle_equip(&state.pool, caller.user_id, item_id).await?;

    Ok(Json(serde_json::json!({ "data": item })))
}
