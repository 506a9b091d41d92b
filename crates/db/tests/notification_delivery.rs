//! Integration tests for notification delivery and read tracking.

use chrono::{Duration, Utc};
use skillforge_db::models::notification::CreateNotification;
use skillforge_db::models::user::CreateUser;
use skillforge_db::repositories::{NotificationRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake-hash-for-tests".to_string(),
            phone: None,
            role: "trainee".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_notification(user_id: i64, title: &str) -> CreateNotification {
    CreateNotification {
        user_id,
        notification_type: "system".to_string(),
        title: title.to_string(),
        message: "hello".to_string(),
        data: None,
        priority: None,
        action_url: None,
        icon: None,
        expires_at: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let user_id = seed_user(&pool, "defaults@example.com").await;

    let created = NotificationRepo::create(&pool, &new_notification(user_id, "Welcome"))
        .await
        .unwrap();
    assert_eq!(created.priority, "normal");
    assert!(!created.is_read);
    assert!(created.read_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_notifications_are_skipped(pool: PgPool) {
    let user_id = seed_user(&pool, "expiry@example.com").await;

    let mut expired = new_notification(user_id, "Old news");
    expired.expires_at = Some(Utc::now() - Duration::hours(1));
    NotificationRepo::create(&pool, &expired).await.unwrap();

    let mut current = new_notification(user_id, "Fresh");
    current.expires_at = Some(Utc::now() + Duration::hours(1));
    NotificationRepo::create(&pool, &current).await.unwrap();

    let listed = NotificationRepo::list_for_user(&pool, user_id, false, 50, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Fresh");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_read_is_scoped_and_single_shot(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let intruder = seed_user(&pool, "intruder@example.com").await;

    let created = NotificationRepo::create(&pool, &new_notification(owner, "Private"))
        .await
        .unwrap();

    // Another user cannot mark it.
    assert!(!NotificationRepo::mark_read(&pool, created.id, intruder)
        .await
        .unwrap());

    assert!(NotificationRepo::mark_read(&pool, created.id, owner)
        .await
        .unwrap());

    // Already read, so a second call reports no change.
    assert!(!NotificationRepo::mark_read(&pool, created.id, owner)
        .await
        .unwrap());

    let unread = NotificationRepo::list_for_user(&pool, owner, true, 50, 0)
        .await
        .unwrap();
    assert!(unread.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_broadcast_creates_one_row_per_user(pool: PgPool) {
    let a = seed_user(&pool, "a@example.com").await;
    let b = seed_user(&pool, "b@example.com").await;
    let c = seed_user(&pool, "c@example.com").await;

    let rows = NotificationRepo::broadcast(
        &pool,
        &[a, b],
        &new_notification(0, "Maintenance window"),
    )
    .await
    .unwrap();
    assert_eq!(rows, 2);

    for (user_id, expected) in [(a, 1), (b, 1), (c, 0)] {
        let listed = NotificationRepo::list_for_user(&pool, user_id, false, 50, 0)
            .await
            .unwrap();
        assert_eq!(listed.len(), expected, "user {user_id}");
    }
}
