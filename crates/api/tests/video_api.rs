//! HTTP-level integration tests for the `/videos` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_customer, create_video, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_video_returns_201_with_full_inventory(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/videos",
        json!({"title": "Alien", "release_date": "1979-05-25", "total_inventory": 3}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["title"], "Alien");
    assert_eq!(json["release_date"], "1979-05-25");
    assert_eq!(json["total_inventory"], 3);
    assert_eq!(json["available_inventory"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_video_missing_field_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/videos", json!({"title": "Alien", "release_date": "1979-05-25"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_FIELD");
    assert!(json["error"].as_str().unwrap().contains("total_inventory"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_video_malformed_date_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/videos",
        json!({"title": "Alien", "release_date": "May 25, 1979", "total_inventory": 3}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_FORMAT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_video_negative_inventory_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/videos",
        json!({"title": "Alien", "release_date": "1979-05-25", "total_inventory": -1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_video_non_numeric_inventory_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/videos",
        json!({"title": "Alien", "release_date": "1979-05-25", "total_inventory": "three"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_and_get_videos(pool: PgPool) {
    let alien = create_video(&pool, "Alien", 3).await;
    create_video(&pool, "Heat", 1).await;

    let response = get(common::build_test_app(pool.clone()), "/videos").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = get(common::build_test_app(pool), &format!("/videos/{alien}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Alien");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_video_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/videos/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_video(pool: PgPool) {
    let id = create_video(&pool, "Alien", 3).await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/videos/{id}"),
        json!({"title": "Aliens", "release_date": "1986-07-18", "total_inventory": 4}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Aliens");
    assert_eq!(json["release_date"], "1986-07-18");
    assert_eq!(json["total_inventory"], 4);
    assert_eq!(json["available_inventory"], 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_video_below_rented_copies_returns_400(pool: PgPool) {
    let customer_id = create_customer(&pool, "Amy").await;
    let video_id = create_video(&pool, "Alien", 1).await;
    post_json(
        common::build_test_app(pool.clone()),
        "/rentals/check-out",
        json!({"customer_id": customer_id, "video_id": video_id}),
    )
    .await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/videos/{video_id}"),
        json!({"title": "Alien", "release_date": "1979-05-25", "total_inventory": 0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_nonexistent_video_returns_404(pool: PgPool) {
    let response = put_json(
        common::build_test_app(pool),
        "/videos/999999",
        json!({"title": "Ghost", "release_date": "1990-01-01", "total_inventory": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_video(pool: PgPool) {
    let id = create_video(&pool, "Alien", 3).await;

    let response = delete(common::build_test_app(pool.clone()), &format!("/videos/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["success"], true);

    let response = get(common::build_test_app(pool), &format!("/videos/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_nonexistent_video_returns_404(pool: PgPool) {
    let response = delete(common::build_test_app(pool), "/videos/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Current renters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_video_renters(pool: PgPool) {
    let customer_id = create_customer(&pool, "Amy").await;
    let video_id = create_video(&pool, "Alien", 3).await;
    post_json(
        common::build_test_app(pool.clone()),
        "/rentals/check-out",
        json!({"customer_id": customer_id, "video_id": video_id}),
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        &format!("/videos/{video_id}/rentals"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], "Amy");
    assert_eq!(arr[0]["postal_code"], "12345");
    assert_eq!(arr[0]["phone"], "555-0100");
    assert!(arr[0]["due_date"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_renters_for_nonexistent_video_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/videos/999999/rentals").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
