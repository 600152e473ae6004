//! Route definition for the `/events` ingestion endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// POST   /events   -> ingest_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/events", post(events::ingest_event))
}
