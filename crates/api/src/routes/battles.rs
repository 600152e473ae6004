//! Route definitions for the `/bosses` and `/battles` resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::battles;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET    /bosses                  -> list_bosses
/// GET    /battles                 -> battle_history
/// POST   /battles                 -> start_battle
/// GET    /battles/active          -> active_battle
/// POST   /battles/{id}/progress   -> record_progress
/// POST   /battles/{id}/abandon    -> abandon_battle
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bosses", get(battles::list_bosses))
        .route(
            "/battles",
            get(battles::battle_history).post(battles::start_battle),
        )
        .route("/battles/active", get(battles::active_battle))
        .route("/battles/{id}/progress", post(battles::record_progress))
        .route("/battles/{id}/abandon", post(battles::abandon_battle))
}
