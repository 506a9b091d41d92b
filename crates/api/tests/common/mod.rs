#![allow(dead_code)]

//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! on top of the per-test database from `#[sqlx::test]`, with a local
//! filesystem certificate store so no network is involved.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use skillforge_api::auth::jwt::{generate_access_token, JwtConfig};
use skillforge_api::auth::password::hash_password;
use skillforge_api::config::ServerConfig;
use skillforge_api::router::build_app_router;
use skillforge_api::state::AppState;
use skillforge_certgen::{CertificateService, LocalImageStore};
use skillforge_core::types::DbId;
use skillforge_db::models::category::{CreateCategory, CreateTrainingCourse};
use skillforge_db::models::registration::CreateRegistration;
use skillforge_db::models::training_session::CreateTrainingSession;
use skillforge_db::models::user::{CreateUser, User};
use skillforge_db::repositories::{CategoryRepo, RegistrationRepo, TrainingSessionRepo, UserRepo};

/// Password used for every seeded test user.
pub const TEST_PASSWORD: &str = "test-password-123";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_url: "http://localhost:5173".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Certificates go through a [`LocalImageStore`] writing under the OS temp
/// directory; the font fallback keeps rendering working without assets.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let cert_dir = std::env::temp_dir().join("skillforge-test-certs");
    let store = Arc::new(LocalImageStore::new(
        cert_dir,
        "http://localhost:5173/certificates".to_string(),
    ));
    let certificates = Arc::new(CertificateService::new(
        store,
        PathBuf::from("this-font-does-not-exist.ttf"),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        certificates,
        mailer: None,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    send(app, "GET", path, None, None).await
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, "GET", path, Some(token), None).await
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", path, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", path, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, "POST", path, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", path, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", path, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body, printing the body on
/// mismatch so failures are debuggable.
pub async fn expect_status(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {json}");
    json
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a user with the given role and a known password, returning the row.
pub async fn seed_user(pool: &PgPool, role: &str, email: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            first_name: "Test".to_string(),
            last_name: role.to_string(),
            email: email.to_string(),
            password_hash,
            phone: None,
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
}

/// Mint a valid access token for a seeded user.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt).unwrap()
}

/// Insert a category with one course; returns (category_id, course_id).
pub async fn seed_category_with_course(pool: &PgPool) -> (DbId, DbId) {
    let category = CategoryRepo::create_category(
        pool,
        &CreateCategory {
            name: format!("Category {}", Utc::now().timestamp_nanos_opt().unwrap_or(0)),
            description: None,
        },
    )
    .await
    .unwrap();

    let course = CategoryRepo::create_course(
        pool,
        &CreateTrainingCourse {
            category_id: category.id,
            title: "Intro course".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    (category.id, course.id)
}

/// Insert a training session owned by `coordinator_id`, scheduled for a
/// future date so its phase is `scheduled`.
pub async fn seed_future_session(pool: &PgPool, coordinator_id: DbId, category_id: DbId) -> DbId {
    seed_session_on(
        pool,
        coordinator_id,
        category_id,
        (Utc::now() + Duration::days(30)).date_naive(),
    )
    .await
}

/// Insert a training session on a date already in the past, so its phase is
/// `completed`.
pub async fn seed_past_session(pool: &PgPool, coordinator_id: DbId, category_id: DbId) -> DbId {
    seed_session_on(
        pool,
        coordinator_id,
        category_id,
        (Utc::now() - Duration::days(30)).date_naive(),
    )
    .await
}

async fn seed_session_on(
    pool: &PgPool,
    coordinator_id: DbId,
    category_id: DbId,
    session_date: NaiveDate,
) -> DbId {
    let session = TrainingSessionRepo::create(
        pool,
        &CreateTrainingSession {
            category_id,
            trainer_id: None,
            coordinator_id,
            session_date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            location: "Room 1".to_string(),
            max_participants: None,
            skill_name: "Rust".to_string(),
            skill_description: None,
        },
    )
    .await
    .unwrap();
    session.id
}

/// Insert a pending registration for (user, session); returns its id.
pub async fn seed_registration(pool: &PgPool, user_id: DbId, session_id: DbId) -> DbId {
    RegistrationRepo::create(
        pool,
        &CreateRegistration {
            user_id,
            training_session_id: session_id,
        },
    )
    .await
    .unwrap()
    .id
}

/// Insert a registration and flip it to `confirmed`.
pub async fn seed_confirmed_registration(pool: &PgPool, user_id: DbId, session_id: DbId) -> DbId {
    let id = seed_registration(pool, user_id, session_id).await;
    RegistrationRepo::set_status(pool, id, "confirmed")
        .await
        .unwrap()
        .unwrap();
    id
}
