//! Handlers for the `/achievements` resource.

use axum::extract::State;
use axum::Json;

use edura_db::repositories::{AchievementRepo, UserAchievementRepo};

use crate::error::AppResult;
use crate::identity::CallerIdentity;
use crate::state::AppState;

/// GET /api/v1/achievements
///
/// List the full achievement catalogue.
pub async fn list_achievements(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let achievements = AchievementRepo::list(&state.pool).await?;

    Ok(Json(serde_json::json!({ "data": achievements })))
}

/// GET /api/v1/achievements/unlocked
///
/// List the authenticated user's unlocked achievements, newest first.
pub async fn list_unlocked(
    caller: CallerIdentity,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let grants = UserAchievementRepo::list_for_user(&state.pool, caller.user_id).await?;

    Ok(Json(serde_json::json!({ "data": grants })))
}
