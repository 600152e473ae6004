//! HTTP-level integration tests for event ingestion, achievements, the
//! mascot resource and notifications.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_as, post_as, post_json, post_json_as};
use sqlx::PgPool;

const USER: i64 = 7;

// ---------------------------------------------------------------------------
// Caller identity
// ---------------------------------------------------------------------------

/// Requests without an x-user-id header are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_identity_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "event_type": "comment_posted" });
    let response = post_json(app.clone(), "/api/v1/events", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(app, "/api/v1/mascot").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A non-numeric x-user-id header is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_identity_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/mascot")
        .header("x-user-id", "not-a-number")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Events and achievements
// ---------------------------------------------------------------------------

/// An unknown event type is rejected with a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_event_type_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "event_type": "mystery_event" });
    let response = post_json_as(app, "/api/v1/events", USER, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// The seeded catalogue is visible without identity.
#[sqlx::test(migrations = "../db/migrations")]
async fn achievement_catalogue_lists_seeded_rows(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/achievements").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Comentarista"));
    assert!(names.contains(&"Semana Dedicada"));
}

/// The fifth comment unlocks the comment achievement, and the grant shows
/// up both in the ingestion response and in the caller's unlock list.
#[sqlx::test(migrations = "../db/migrations")]
async fn comment_threshold_grants_through_the_api(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "event_type": "comment_posted" });

    for _ in 0..4 {
        let response = post_json_as(app.clone(), "/api/v1/events", USER, body.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["data"]["granted"].as_array().unwrap().is_empty());
    }

    let response = post_json_as(app.clone(), "/api/v1/events", USER, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let granted = json["data"]["granted"].as_array().unwrap();
    assert_eq!(granted.len(), 1);
    assert_eq!(granted[0]["achievement"]["name"], "Comentarista");

    let response = get_as(app.clone(), "/api/v1/achievements/unlocked", USER).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Another user's list stays empty.
    let response = get_as(app, "/api/v1/achievements/unlocked", 8).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Mascot
// ---------------------------------------------------------------------------

/// First access creates the mascot with default state.
#[sqlx::test(migrations = "../db/migrations")]
async fn mascot_is_created_on_first_access(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_as(app, "/api/v1/mascot", USER).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["level"], 1);
    assert_eq!(json["data"]["experience"], 0);
    assert_eq!(json["data"]["mood"], 100);
    assert_eq!(json["data"]["energy"], 100);
}

/// Mood deltas clamp to the [0, 100] range.
#[sqlx::test(migrations = "../db/migrations")]
async fn mood_clamps_at_the_floor(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "delta": -250 });
    let response = post_json_as(app, "/api/v1/mascot/mood", USER, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["mood"], 0);
    assert_eq!(json["data"]["energy"], 100);
}

/// Negative experience amounts are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn negative_experience_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "amount": -10 });
    let response = post_json_as(app, "/api/v1/mascot/experience", USER, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Experience added over the level threshold levels the mascot up.
#[sqlx::test(migrations = "../db/migrations")]
async fn experience_levels_up_through_the_api(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "amount": 250 });
    let response = post_json_as(app, "/api/v1/mascot/experience", USER, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["level"], 2);
    assert_eq!(json["data"]["experience"], 150);
}

/// Items accumulate and can be equipped; equipping an item the mascot does
/// not own is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn inventory_add_and_equip_flow(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "item_id": 2, "quantity": 2 });
    let response = post_json_as(app.clone(), "/api/v1/mascot/items", USER, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["quantity"], 2);
    assert_eq!(json["data"]["equipped"], false);

    let response = post_as(app.clone(), "/api/v1/mascot/items/2/equip", USER).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["equipped"], true);

    let response = post_as(app.clone(), "/api/v1/mascot/items/99/equip", USER).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_as(app, "/api/v1/mascot/items", USER).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// A zero or negative quantity is rejected before touching the inventory.
#[sqlx::test(migrations = "../db/migrations")]
async fn zero_quantity_item_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "item_id": 2, "quantity": 0 });
    let response = post_json_as(app, "/api/v1/mascot/items", USER, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// A grant produces a notification the caller can list, count and mark read.
#[sqlx::test(migrations = "../db/migrations")]
async fn grant_notification_read_flow(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "event_type": "comment_posted" });

    for _ in 0..5 {
        post_json_as(app.clone(), "/api/v1/events", USER, body.clone()).await;
    }

    let response = get_as(app.clone(), "/api/v1/notifications/unread-count", USER).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 1);

    let response = get_as(app.clone(), "/api/v1/notifications", USER).await;
    let json = body_json(response).await;
    let notifications = json["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    let id = notifications[0]["id"].as_i64().unwrap();

    // The wrong user cannot mark it read.
    let response = post_as(app.clone(), &format!("/api/v1/notifications/{id}/read"), 8).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_as(app.clone(), &format!("/api/v1/notifications/{id}/read"), USER).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_as(app, "/api/v1/notifications/unread-count", USER).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);
}

/// read-all marks every unread notification and reports the count.
#[sqlx::test(migrations = "../db/migrations")]
async fn read_all_reports_marked_count(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    edura_db::repositories::NotificationRepo::create(&pool, USER, "A", "first")
        .await
        .unwrap();
    edura_db::repositories::NotificationRepo::create(&pool, USER, "B", "second")
        .await
        .unwrap();

    let response = post_as(app.clone(), "/api/v1/notifications/read-all", USER).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["marked_read"], 2);

    let response = get_as(app, "/api/v1/notifications/unread-count", USER).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);
}
