//! Handler for the `/events` ingestion endpoint.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use edura_engine::AchievementGranter;

use crate::error::AppResult;
use crate::identity::CallerIdentity;
use crate::state::AppState;

/// Body for `POST /events`.
#[derive(Debug, Deserialize)]
pub struct EventRequest {
    /// Domain event type, e.g. `"comment_posted"`.
    pub event_type: String,
    /// Free-form event payload; stored with the activity record.
    pub payload: Option<serde_json::Value>,
}

/// POST /api/v1/events
///
/// Ingest a domain event for the authenticated user. The event is recorded
/// and every achievement reacting to its type is evaluated; any freshly
/// granted achievements come back in the response.
pub async fn ingest_event(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Json(input): Json<EventRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let payload = input.payload.unwrap_or_else(|| serde_json::json!({}));

    let granted = AchievementGranter::on_event(
        &state.pool,
        &state.event_bus,
        caller.user_id,
        &input.event_type,
        payload,
    )
    .await?;

    Ok(Json(serde_json::json!({ "data": { "granted": granted } })))
}
