//! Integration tests for the notification inbox.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_user, get, get_auth, initialize_site, post_empty,
    sent_broadcast, token_for, update_settings,
};
use kobonat_core::roles::ROLE_MEMBER_ID;
use kobonat_db::models::settings::UpdateSettings;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn inbox_delivers_each_broadcast_once(pool: PgPool) {
    initialize_site(&pool).await;
    let member = create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let token = token_for(&member);
    for title in ["عرض 1", "عرض 2", "عرض 3"] {
        sent_broadcast(&pool, title).await;
    }

    let first = body_json(get_auth(build_test_app(pool.clone()), "/notifications/", &token).await).await;
    assert_eq!(first["notifications"].as_array().unwrap().len(), 3);
    assert_eq!(first["unread_count"], 3);

    let again = body_json(get_auth(build_test_app(pool.clone()), "/notifications/", &token).await).await;
    assert_eq!(again["notifications"].as_array().unwrap().len(), 3);

    let count = body_json(
        get_auth(build_test_app(pool), "/api/notifications/count/", &token).await,
    )
    .await;
    assert_eq!(count["count"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inbox_is_localized(pool: PgPool) {
    initialize_site(&pool).await;
    let member = create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    sent_broadcast(&pool, "تخفيضات").await;

    let request = axum::http::Request::builder()
        .uri("/notifications/")
        .header("authorization", format!("Bearer {}", token_for(&member)))
        .header("cookie", "lang=en")
        .body(axum::body::Body::empty())
        .unwrap();
    let json = body_json(common::send(build_test_app(pool), request).await).await;

    assert_eq!(json["lang"], "en");
    assert_eq!(json["notifications"][0]["title"], "تخفيضات (en)");
    // No English message: falls back to Arabic.
    assert_eq!(json["notifications"][0]["message"], "تخفيضات body");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_read_and_read_all(pool: PgPool) {
    initialize_site(&pool).await;
    let member = create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let token = token_for(&member);
    sent_broadcast(&pool, "عرض 1").await;
    sent_broadcast(&pool, "عرض 2").await;

    let inbox = body_json(get_auth(build_test_app(pool.clone()), "/notifications/", &token).await).await;
    let first_id = inbox["notifications"][0]["id"].as_i64().unwrap();

    let marked = post_empty(
        build_test_app(pool.clone()),
        &format!("/mark-notification-read/{first_id}/"),
        Some(&token),
    )
    .await;
    assert_eq!(marked.status(), StatusCode::OK);
    assert_eq!(body_json(marked).await, serde_json::json!({"success": true}));

    let all = post_empty(
        build_test_app(pool.clone()),
        "/notifications/read-all/",
        Some(&token),
    )
    .await;
    let json = body_json(all).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["marked_read"], 1);

    let count = body_json(
        get_auth(build_test_app(pool), "/api/notifications/count/", &token).await,
    )
    .await;
    assert_eq!(count["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cannot_mark_someone_elses_notification(pool: PgPool) {
    initialize_site(&pool).await;
    let owner = create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let other = create_user(&pool, "omar", ROLE_MEMBER_ID).await;
    sent_broadcast(&pool, "عرض").await;

    let inbox = body_json(
        get_auth(build_test_app(pool.clone()), "/notifications/", &token_for(&owner)).await,
    )
    .await;
    let id = inbox["notifications"][0]["id"].as_i64().unwrap();

    let response = post_empty(
        build_test_app(pool),
        &format!("/mark-notification-read/{id}/"),
        Some(&token_for(&other)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_count_is_zero(pool: PgPool) {
    initialize_site(&pool).await;
    let response = get(build_test_app(pool), "/api/notifications/count/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn disabled_notifications(pool: PgPool) {
    initialize_site(&pool).await;
    let member = create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let token = token_for(&member);
    sent_broadcast(&pool, "عرض").await;
    // Deliver before switching the feature off.
    get_auth(build_test_app(pool.clone()), "/notifications/", &token).await;
    update_settings(
        &pool,
        UpdateSettings {
            enable_notifications: Some(false),
            ..Default::default()
        },
    )
    .await;

    let inbox = get_auth(build_test_app(pool.clone()), "/notifications/", &token).await;
    assert_eq!(inbox.status(), StatusCode::FORBIDDEN);

    let count = body_json(
        get_auth(build_test_app(pool.clone()), "/api/notifications/count/", &token).await,
    )
    .await;
    assert_eq!(count["count"], 0);

    let read_all = post_empty(build_test_app(pool), "/notifications/read-all/", Some(&token)).await;
    assert_eq!(read_all.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(read_all).await["error"], "FEATURE_DISABLED");
}
