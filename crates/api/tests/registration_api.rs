//! HTTP-level integration tests for the `/registrations` endpoints and the
//! approve/reject decision flow.

mod common;

use axum::http::StatusCode;
use common::{
    expect_status, get_auth, post_auth, post_json_auth, put_json_auth,
    seed_category_with_course, seed_confirmed_registration, seed_future_session,
    seed_past_session, seed_registration, seed_user, token_for,
};
use sqlx::PgPool;

use skillforge_db::repositories::{NotificationRepo, RegistrationRepo};

#[sqlx::test(migrations = "../db/migrations")]
async fn test_trainee_registers_self_as_pending(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/registrations",
        &token_for(&trainee),
        // A trainee cannot register someone else; the server overrides the
        // user_id with the caller's own id.
        serde_json::json!({"user_id": coordinator.id, "training_session_id": session_id}),
    )
    .await;

    let json = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["user_id"], trainee.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_coordinator_registering_unknown_user_returns_404(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/registrations",
        &token_for(&coordinator),
        serde_json::json!({"user_id": 999_999, "training_session_id": session_id}),
    )
    .await;

    let json = expect_status(response, StatusCode::NOT_FOUND).await;
    assert!(json["error"].as_str().unwrap().contains("User"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_registration_returns_409(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    seed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/registrations",
        &token_for(&trainee),
        serde_json::json!({"user_id": trainee.id, "training_session_id": session_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_owning_coordinator_approves(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/approve"),
        &token_for(&coordinator),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "confirmed");

    // The trainee got an in-app notification about the decision.
    let notifications = NotificationRepo::list_for_user(&pool, trainee.id, true, 50, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].notification_type, "registration_approved");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_owning_coordinator_cannot_decide(pool: PgPool) {
    let owner = seed_user(&pool, "coordinator", "owner@test.com").await;
    let other = seed_user(&pool, "coordinator", "other@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, owner.id, category_id).await;
    let registration_id = seed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/approve"),
        &token_for(&other),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The registration is untouched.
    let registration = RegistrationRepo::find_by_id(&pool, registration_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registration.status, "pending");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_decided_registration_cannot_be_approved_again(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_confirmed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/approve"),
        &token_for(&coordinator),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reject_moves_to_cancelled(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/reject"),
        &token_for(&coordinator),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "cancelled");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_trainee_cancels_before_session_starts(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}"),
        &token_for(&trainee),
        serde_json::json!({"status": "cancelled"}),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "cancelled");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_cancel_after_session_started(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_past_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_confirmed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}"),
        &token_for(&trainee),
        serde_json::json!({"status": "cancelled"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_pending_queue_scoped_to_coordinator(pool: PgPool) {
    let owner = seed_user(&pool, "coordinator", "owner@test.com").await;
    let other = seed_user(&pool, "coordinator", "other@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, owner.id, category_id).await;
    seed_registration(&pool, trainee.id, session_id).await;

    // The owner sees their queue.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/registrations/pending/{}", owner.id),
        &token_for(&owner),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Another coordinator may not read it.
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/registrations/pending/{}", owner.id),
        &token_for(&other),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_stats_counts_by_status(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let a = seed_user(&pool, "trainee", "a@test.com").await;
    let b = seed_user(&pool, "trainee", "b@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    seed_registration(&pool, a.id, session_id).await;
    seed_confirmed_registration(&pool, b.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/registrations/stats",
        &token_for(&coordinator),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["pending"], 1);
    assert_eq!(json["data"]["confirmed"], 1);
    assert_eq!(json["data"]["cancelled"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_register_for_archived_session(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;

    let app = common::build_test_app(pool.clone());
    post_auth(
        app,
        &format!("/api/v1/training-sessions/{session_id}/archive"),
        &token_for(&coordinator),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/registrations",
        &token_for(&trainee),
        serde_json::json!({"user_id": trainee.id, "training_session_id": session_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
