//! HTTP-level integration tests for the boss battle lifecycle.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, get_as, post_as, post_json_as};
use sqlx::PgPool;

const USER: i64 = 7;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The id of the first seeded boss.
async fn first_boss_id(app: Router) -> i64 {
    let response = get(app, "/api/v1/bosses").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"][0]["id"].as_i64().unwrap()
}

/// Start a battle and return its id.
async fn start_battle(app: Router, boss_id: i64) -> i64 {
    let body = serde_json::json!({ "boss_id": boss_id });
    let response = post_json_as(app, "/api/v1/battles", USER, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["battle"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Starting
// ---------------------------------------------------------------------------

/// Starting a battle debits the entry cost from the mascot's energy.
#[sqlx::test(migrations = "../db/migrations")]
async fn starting_debits_energy(pool: PgPool) {
    let app = common::build_test_app(pool);
    let boss_id = first_boss_id(app.clone()).await;

    let body = serde_json::json!({ "boss_id": boss_id });
    let response = post_json_as(app, "/api/v1/battles", USER, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["battle"]["progress"], 0);
    assert_eq!(json["data"]["battle"]["completed"], false);
    assert_eq!(json["data"]["mascot"]["energy"], 70);
}

/// Only one battle can be active at a time.
#[sqlx::test(migrations = "../db/migrations")]
async fn second_start_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let boss_id = first_boss_id(app.clone()).await;
    start_battle(app.clone(), boss_id).await;

    let body = serde_json::json!({ "boss_id": boss_id });
    let response = post_json_as(app, "/api/v1/battles", USER, body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

/// Starting below the energy threshold is rejected with the amounts.
#[sqlx::test(migrations = "../db/migrations")]
async fn low_energy_start_reports_amounts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let boss_id = first_boss_id(app.clone()).await;

    let body = serde_json::json!({ "delta": -80 });
    post_json_as(app.clone(), "/api/v1/mascot/energy", USER, body).await;

    let body = serde_json::json!({ "boss_id": boss_id });
    let response = post_json_as(app, "/api/v1/battles", USER, body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INSUFFICIENT_ENERGY");
    assert_eq!(json["details"]["current"], 20);
    assert_eq!(json["details"]["required"], 30);
}

/// An unknown boss is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_boss_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "boss_id": 999 });
    let response = post_json_as(app, "/api/v1/battles", USER, body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Progress and victory
// ---------------------------------------------------------------------------

/// Progress below 100 keeps the battle ongoing; crossing 100 completes it
/// and pays out the boss's reward bundle.
#[sqlx::test(migrations = "../db/migrations")]
async fn victory_pays_out(pool: PgPool) {
    let app = common::build_test_app(pool);
    let boss_id = first_boss_id(app.clone()).await;
    let battle_id = start_battle(app.clone(), boss_id).await;

    let body = serde_json::json!({ "increment": 50 });
    let response =
        post_json_as(app.clone(), &format!("/api/v1/battles/{battle_id}/progress"), USER, body)
            .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ongoing");
    assert_eq!(json["data"]["battle"]["progress"], 50);

    let body = serde_json::json!({ "increment": 60 });
    let response =
        post_json_as(app.clone(), &format!("/api/v1/battles/{battle_id}/progress"), USER, body)
            .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "victory");
    assert_eq!(json["data"]["battle"]["progress"], 100);
    assert_eq!(json["data"]["battle"]["outcome"], "victory");
    // First boss pays 50 crystals; level 1 victory pays exactly one level.
    assert_eq!(json["data"]["rewards"]["crystals"], 50);
    assert_eq!(json["data"]["mascot"]["level"], 2);
    assert_eq!(json["data"]["mascot"]["crystals"], 50);

    // The active slot is free again.
    let response = get_as(app, "/api/v1/battles/active", USER).await;
    let json = body_json(response).await;
    assert!(json["data"].is_null());
}

/// A zero increment is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn zero_increment_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let boss_id = first_boss_id(app.clone()).await;
    let battle_id = start_battle(app.clone(), boss_id).await;

    let body = serde_json::json!({ "increment": 0 });
    let response =
        post_json_as(app, &format!("/api/v1/battles/{battle_id}/progress"), USER, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Another user cannot advance someone else's battle.
#[sqlx::test(migrations = "../db/migrations")]
async fn progress_requires_ownership(pool: PgPool) {
    let app = common::build_test_app(pool);
    let boss_id = first_boss_id(app.clone()).await;
    let battle_id = start_battle(app.clone(), boss_id).await;

    let body = serde_json::json!({ "increment": 10 });
    let response =
        post_json_as(app, &format!("/api/v1/battles/{battle_id}/progress"), 8, body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Abandoning
// ---------------------------------------------------------------------------

/// Abandoning pays half the accumulated progress as consolation experience
/// and frees the active slot.
#[sqlx::test(migrations = "../db/migrations")]
async fn abandoning_pays_consolation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let boss_id = first_boss_id(app.clone()).await;
    let battle_id = start_battle(app.clone(), boss_id).await;

    let body = serde_json::json!({ "increment": 45 });
    post_json_as(app.clone(), &format!("/api/v1/battles/{battle_id}/progress"), USER, body).await;

    let response =
        post_as(app.clone(), &format!("/api/v1/battles/{battle_id}/abandon"), USER).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["consolation_experience"], 22);
    assert_eq!(json["data"]["battle"]["outcome"], "abandoned");
    assert_eq!(json["data"]["mascot"]["experience"], 22);

    let response = get_as(app.clone(), "/api/v1/battles/active", USER).await;
    let json = body_json(response).await;
    assert!(json["data"].is_null());

    // History keeps the completed battle.
    let response = get_as(app, "/api/v1/battles", USER).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// Progressing a completed battle is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn progress_after_completion_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let boss_id = first_boss_id(app.clone()).await;
    let battle_id = start_battle(app.clone(), boss_id).await;

    post_as(app.clone(), &format!("/api/v1/battles/{battle_id}/abandon"), USER).await;

    let body = serde_json::json!({ "increment": 10 });
    let response =
        post_json_as(app, &format!("/api/v1/battles/{battle_id}/progress"), USER, body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
