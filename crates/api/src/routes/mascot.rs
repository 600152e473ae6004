//! Route definitions for the `/mascot` resource.
//!
//! All endpoints act on the authenticated caller's mascot.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mascot;
use crate::state::AppState;

/// Routes mounted at `/mascot`.
///
/// ```text
/// GET    /                        -> get_mascot
/// POST   /experience              -> add_experience
/// POST   /mood                    -> update_mood
/// POST   /energy                  -> update_energy
/// GET    /items                   -> list_items
/// POST   /items                   -> add_item
/// POST   /items/{item_id}/equip   -> toggle_equip
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mascot::get_mascot))
        .route("/experience", post(mascot::add_experience))
        .route("/mood", post(mascot::update_mood))
        .route("/energy", post(mascot::update_energy))
        .route("/items", get(mascot::list_items).post(mascot::add_item))
        .route("/items/{item_id}/equip", post(mascot::toggle_equip))
}
