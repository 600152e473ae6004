//! Caller identity extractor for Axum handlers.
//!
//! Authentication is owned by the platform gateway; by the time a request
//! reaches this service the gateway has already verified the session and
//! stamped the user's id onto the `x-user-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use edura_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, taken from the `x-user-id` header.
///
/// Use this as an extractor parameter in any handler that acts on behalf
/// of a user:
///
/// ```ignore
/// async fn my_handler(caller: CallerIdentity) -> AppResult<Json<()>> {
///     tracing::info!(user_id = caller.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity {
    /// The caller's internal database id.
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing x-user-id header".into()))?;

        let user_id: DbId = header
            .parse()
            .map_err(|_| AppError::Unauthorized("x-user-id must be a numeric user id".into()))?;

        if user_id <= 0 {
            return Err(AppError::Unauthorized(
                "x-user-id must be a positive user id".into(),
            ));
        }

        Ok(CallerIdentity { user_id })
    }
}
