//! HTTP-level integration tests for feedback and attendance under a
//! registration.

mod common;

use axum::http::StatusCode;
use common::{
    expect_status, get_auth, post_json_auth, seed_category_with_course,
    seed_confirmed_registration, seed_future_session, seed_user, token_for,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_feedback_cross_checks_session(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let other_session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_confirmed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/feedback",
        &token_for(&trainee),
        serde_json::json!({
            "registration_id": registration_id,
            "training_session_id": other_session_id,
            "rating": 5
        }),
    )
    .await;

    let json = expect_status(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("does not belong to the specified training session"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_and_list_feedback(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_confirmed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/feedback",
        &token_for(&trainee),
        serde_json::json!({
            "registration_id": registration_id,
            "training_session_id": session_id,
            "rating": 4,
            "comment": "Solid session"
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["rating"], 4);

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/feedback"),
        &token_for(&coordinator),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["comment"], "Solid session");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rating_out_of_range_rejected(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_confirmed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/feedback",
        &token_for(&trainee),
        serde_json::json!({
            "registration_id": registration_id,
            "training_session_id": session_id,
            "rating": 0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_trainee_cannot_review_someone_elses_registration(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let interloper = seed_user(&pool, "trainee", "interloper@test.com").await;
    let (category_id, _) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_confirmed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/feedback",
        &token_for(&interloper),
        serde_json::json!({
            "registration_id": registration_id,
            "training_session_id": session_id,
            "rating": 1
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_and_remark_attendance(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainer = seed_user(&pool, "trainer", "trainer@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, course_id) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_confirmed_registration(&pool, trainee.id, session_id).await;
    let token = token_for(&trainer);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/attendance"),
        &token,
        serde_json::json!({"training_course_id": course_id, "present": true}),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["present"], true);

    // Re-marking the same course overwrites instead of duplicating.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/attendance"),
        &token,
        serde_json::json!({"training_course_id": course_id, "present": false}),
    )
    .await;
    expect_status(response, StatusCode::CREATED).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/attendance"),
        &token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let marks = json["data"].as_array().unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0]["present"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_trainee_cannot_mark_attendance(pool: PgPool) {
    let coordinator = seed_user(&pool, "coordinator", "coord@test.com").await;
    let trainee = seed_user(&pool, "trainee", "trainee@test.com").await;
    let (category_id, course_id) = seed_category_with_course(&pool).await;
    let session_id = seed_future_session(&pool, coordinator.id, category_id).await;
    let registration_id = seed_confirmed_registration(&pool, trainee.id, session_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/attendance"),
        &token_for(&trainee),
        serde_json::json!({"training_course_id": course_id, "present": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
