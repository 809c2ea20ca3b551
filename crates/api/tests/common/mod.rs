//! Shared test harness: router construction, request helpers, and
//! database seeding for the HTTP integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use diaria_api::auth::jwt::{generate_access_token, JwtConfig};
use diaria_api::auth::password::hash_password;
use diaria_api::config::{ServerConfig, WorkflowConfig};
use diaria_api::router::build_app_router;
use diaria_api::state::AppState;
use diaria_core::types::DbId;
use diaria_core::workflow::ApprovalStages;
use diaria_db::models::user::CreateUser;
use diaria_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults: single-stage approval,
/// double-booking check on, fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 60,
        },
        workflow: WorkflowConfig {
            approval_stages: ApprovalStages::One,
            double_booking_check: true,
        },
    }
}

/// Build the full application router with the default test config.
///
/// This goes through [`build_app_router`] so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Build the application router with a custom config (e.g. two-stage
/// approval or the double-booking check disabled).
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response status and return the parsed body, printing the body
/// on mismatch so failures are debuggable.
pub async fn expect_status(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {json}");
    json
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create a user with the given role and return `(user_id, bearer token)`.
/// The token is signed with the test JWT secret.
pub async fn create_user(pool: &PgPool, name: &str, role: &str) -> (DbId, String) {
    let hashed = hash_password("test_password_123!").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@test.com"),
            password_hash: hashed,
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_access_token(user.id, role, &test_config().jwt)
        .expect("token generation should succeed");
    (user.id, token)
}

/// IDs of one active row per catalog table, plus the reserve-pool
/// placeholder row.
pub struct CatalogIds {
    pub posto_id: DbId,
    pub diarista_id: DbId,
    pub reserva_id: DbId,
    pub pool_reserva_id: DbId,
    pub motivo_id: DbId,
    pub shift_id: DbId,
    pub payment_method_id: DbId,
    pub company_id: DbId,
}

/// Insert one active row into every catalog table.
pub async fn seed_catalogs(pool: &PgPool) -> CatalogIds {
    let posto_id = insert_returning_id(pool, "INSERT INTO postos (name) VALUES ('Posto Alfa') RETURNING id").await;
    let diarista_id = insert_returning_id(pool, "INSERT INTO diaristas (name) VALUES ('Maria Silva') RETURNING id").await;
    let reserva_id = insert_returning_id(pool, "INSERT INTO reservas (name) VALUES ('Joao Souza') RETURNING id").await;
    let pool_reserva_id = insert_returning_id(
        pool,
        "INSERT INTO reservas (name, is_pool) VALUES ('Reserva geral', TRUE) RETURNING id",
    )
    .await;
    let motivo_id = insert_returning_id(pool, "INSERT INTO motivos (name) VALUES ('Falta') RETURNING id").await;
    let shift_id = insert_returning_id(
        pool,
        "INSERT INTO shifts (description, hours) VALUES ('12h diurno', 12) RETURNING id",
    )
    .await;
    let payment_method_id = insert_returning_id(
        pool,
        "INSERT INTO payment_methods (description) VALUES ('PIX') RETURNING id",
    )
    .await;
    let company_id = insert_returning_id(pool, "INSERT INTO companies (name) VALUES ('Empresa X') RETURNING id").await;

    CatalogIds {
        posto_id,
        diarista_id,
        reserva_id,
        pool_reserva_id,
        motivo_id,
        shift_id,
        payment_method_id,
        company_id,
    }
}

async fn insert_returning_id(pool: &PgPool, query: &str) -> DbId {
    sqlx::query_scalar::<_, DbId>(query)
        .fetch_one(pool)
        .await
        .expect("catalog seeding should succeed")
}

/// A valid coverage creation body referencing the seeded catalog rows.
pub fn coverage_body(ids: &CatalogIds) -> serde_json::Value {
    serde_json::json!({
        "coverage_date": "2026-01-10",
        "posto_id": ids.posto_id,
        "diarista_id": ids.diarista_id,
        "reserva_id": ids.reserva_id,
        "motivo_id": ids.motivo_id,
        "shift_id": ids.shift_id,
        "requested_payment_method_id": ids.payment_method_id,
        "company_id": ids.company_id,
        "amount_cents": 15000,
        "observation": "Cobertura de falta"
    })
}
