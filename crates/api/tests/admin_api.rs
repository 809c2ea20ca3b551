//! HTTP-level integration tests for the admin surface: full listing,
//! out-of-band edits, and the maintenance reset.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, coverage_body, create_user, delete_auth, expect_status, get_auth, post_json_auth,
    put_json_auth, seed_catalogs,
};
use diaria_core::roles::{ROLE_ADMIN, ROLE_APPROVER, ROLE_SUPERVISOR};
use sqlx::PgPool;

async fn create_coverage(app: axum::Router, token: &str, body: serde_json::Value) -> i64 {
    let response = post_json_auth(app, "/api/v1/coverages", token, body).await;
    let json = expect_status(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_listing_filters_by_status(pool: PgPool) {
    let ids = seed_catalogs(&pool).await;
    let (_, sup_token) = create_user(&pool, "sup1", ROLE_SUPERVISOR).await;
    let (_, appr_token) = create_user(&pool, "appr1", ROLE_APPROVER).await;
    let (_, admin_token) = create_user(&pool, "admin1", ROLE_ADMIN).await;
    let app = common::build_test_app(pool);

    let first = create_coverage(app.clone(), &sup_token, coverage_body(&ids)).await;
    let mut second_body = coverage_body(&ids);
    second_body["coverage_date"] = serde_json::json!("2026-01-11");
    let second = create_coverage(app.clone(), &sup_token, second_body).await;

    post_json_auth(
        app.clone(),
        &format!("/api/v1/approvals/{first}/approve"),
        &appr_token,
        serde_json::json!({}),
    )
    .await;

    let json = body_json(get_auth(app.clone(), "/api/v1/admin/coverages", &admin_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(
        get_auth(
            app.clone(),
            "/api/v1/admin/coverages?status=pending",
            &admin_token,
        )
        .await,
    )
    .await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], second);

    // An unknown status is a validation error, not an empty list.
    let response = get_auth(app, "/api/v1/admin/coverages?status=bogus", &admin_token).await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_listing_requires_admin_role(pool: PgPool) {
    let (_, sup_token) = create_user(&pool, "sup1", ROLE_SUPERVISOR).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/coverages", &sup_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_edit_corrects_fields_without_touching_status(pool: PgPool) {
    let ids = seed_catalogs(&pool).await;
    let (_, sup_token) = create_user(&pool, "sup1", ROLE_SUPERVISOR).await;
    let (_, appr_token) = create_user(&pool, "appr1", ROLE_APPROVER).await;
    let (admin_id, admin_token) = create_user(&pool, "admin1", ROLE_ADMIN).await;
    let app = common::build_test_app(pool.clone());

    let id = create_coverage(app.clone(), &sup_token, coverage_body(&ids)).await;
    post_json_auth(
        app.clone(),
        &format!("/api/v1/approvals/{id}/approve"),
        &appr_token,
        serde_json::json!({}),
    )
    .await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/coverages/{id}"),
        &admin_token,
        serde_json::json!({ "amount_cents": 17500 }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    // Status is untouched even though the record is already approved.
    assert_eq!(json["data"]["amount_cents"], 17500);
    assert_eq!(json["data"]["status"], "approved");

    // The correction leaves a trace with from == to.
    let history = body_json(
        get_auth(app, &format!("/api/v1/coverages/{id}/history"), &admin_token).await,
    )
    .await;
    let entries = history["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["from_status"], "approved");
    assert_eq!(entries[1]["to_status"], "approved");
    assert_eq!(entries[1]["user_id"], admin_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_edit_rejects_bad_references(pool: PgPool) {
    let ids = seed_catalogs(&pool).await;
    let (_, sup_token) = create_user(&pool, "sup1", ROLE_SUPERVISOR).await;
    let (_, admin_token) = create_user(&pool, "admin1", ROLE_ADMIN).await;
    let app = common::build_test_app(pool);

    let id = create_coverage(app.clone(), &sup_token, coverage_body(&ids)).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/coverages/{id}"),
        &admin_token,
        serde_json::json!({ "posto_id": 999999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/coverages/{id}"),
        &admin_token,
        serde_json::json!({ "amount_cents": -5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn maintenance_reset_wipes_workflow_data_only(pool: PgPool) {
    let ids = seed_catalogs(&pool).await;
    let (_, sup_token) = create_user(&pool, "sup1", ROLE_SUPERVISOR).await;
    let (_, appr_token) = create_user(&pool, "appr1", ROLE_APPROVER).await;
    let (_, admin_token) = create_user(&pool, "admin1", ROLE_ADMIN).await;
    let app = common::build_test_app(pool.clone());

    let id = create_coverage(app.clone(), &sup_token, coverage_body(&ids)).await;
    post_json_auth(
        app.clone(),
        &format!("/api/v1/approvals/{id}/approve"),
        &appr_token,
        serde_json::json!({}),
    )
    .await;

    let response = delete_auth(app.clone(), "/api/v1/admin/maintenance/reset", &admin_token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["coverages_deleted"], 1);
    assert_eq!(json["data"]["history_deleted"], 1);

    let coverages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coverages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(coverages, 0);

    // Catalogs and users survive the reset.
    let diaristas: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM diaristas")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(diaristas, 1);
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn maintenance_reset_requires_admin_role(pool: PgPool) {
    let (_, sup_token) = create_user(&pool, "sup1", ROLE_SUPERVISOR).await;
    let app = common::build_test_app(pool);

    let response = delete_auth(app, "/api/v1/admin/maintenance/reset", &sup_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
