pub mod achievements;
pub mod battles;
pub mod events;
pub mod health;
pub mod mascot;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                              ingest a domain event (POST)
///
/// /achievements                        achievement catalogue (GET)
/// /achievements/unlocked               caller's unlocked achievements (GET)
///
/// /mascot                              caller's mascot (GET)
/// /mascot/experience                   add experience (POST)
/// /mascot/mood                         apply mood delta (POST)
/// /mascot/energy                       apply energy delta (POST)
/// /mascot/items                        inventory (GET), add items (POST)
/// /mascot/items/{item_id}/equip        toggle equipped flag (POST)
///
/// /bosses                              boss catalogue (GET)
/// /battles                             history (GET), start (POST)
/// /battles/active                      active battle (GET)
/// /battles/{id}/progress               apply progress increment (POST)
/// /battles/{id}/abandon                abandon battle (POST)
///
/// /notifications                       list (GET)
/// /notifications/read-all              mark all read (POST)
/// /notifications/unread-count          unread count (GET)
/// /notifications/{id}/read             mark one read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(events::router())
        .nest("/achievements", achievements::router())
        .nest("/mascot", mascot::router())
        .merge(battles::router())
        .nest("/notifications", notification::router())
}
