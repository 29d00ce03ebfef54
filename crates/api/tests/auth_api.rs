//! Integration tests for registration, login, token refresh, logout and
//! the profile endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_user, get, get_auth, initialize_site, post_empty,
    post_json, put_json_auth, send, update_settings, PASSWORD,
};
use kobonat_core::roles::ROLE_MEMBER_ID;
use kobonat_db::models::settings::UpdateSettings;
use kobonat_db::repositories::{ProfileRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

fn registration(username: &str, email: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": email,
        "password1": "NewPass123!",
        "password2": "NewPass123!",
    })
}

/// Log in and return the parsed token response.
async fn login(pool: &PgPool, username: &str, password: &str) -> (StatusCode, serde_json::Value) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/login/",
        json!({ "username": username, "password": password }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

/// POST JSON with a `lang` cookie attached.
async fn post_json_lang(
    pool: &PgPool,
    uri: &str,
    body: serde_json::Value,
    lang: &str,
) -> axum::response::Response {
    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("cookie", format!("lang={lang}"))
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();
    send(build_test_app(pool.clone()), request).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_member_and_signs_in(pool: PgPool) {
    initialize_site(&pool).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/register/",
        registration("sara", "sara@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["username"], "sara");
    assert_eq!(json["user"]["role"], "member");
    assert_eq!(json["message"], "تم إنشاء حسابك بنجاح!");

    let user = UserRepo::find_by_username(&pool, "sara").await.unwrap().unwrap();
    let profile = ProfileRepo::find_by_user_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(profile.preferred_language, "ar");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_is_reported_in_visitor_language(pool: PgPool) {
    initialize_site(&pool).await;
    create_user(&pool, "sara", ROLE_MEMBER_ID).await;

    let response = post_json_lang(
        &pool,
        "/register/",
        registration("sara", "other@example.com"),
        "en",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Username already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_rejected(pool: PgPool) {
    initialize_site(&pool).await;
    create_user(&pool, "sara", ROLE_MEMBER_ID).await;

    let response = post_json(
        build_test_app(pool),
        "/register/",
        registration("sara2", "sara@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "البريد الإلكتروني مسجل مسبقاً");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mismatched_passwords_are_rejected(pool: PgPool) {
    initialize_site(&pool).await;
    let form = json!({
        "username": "sara",
        "email": "sara@example.com",
        "password1": "NewPass123!",
        "password2": "NewPass124!",
    });

    let response = post_json(build_test_app(pool), "/register/", form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "كلمات المرور غير متطابقة");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn registration_can_be_closed(pool: PgPool) {
    initialize_site(&pool).await;
    update_settings(
        &pool,
        UpdateSettings {
            enable_registration: Some(false),
            ..Default::default()
        },
    )
    .await;

    let response = post_json(
        build_test_app(pool),
        "/register/",
        registration("sara", "sara@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "التسجيل مغلق حالياً");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_returns_tokens(pool: PgPool) {
    initialize_site(&pool).await;
    create_user(&pool, "sara", ROLE_MEMBER_ID).await;

    let (status, json) = login(&pool, "sara", PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["role"], "member");

    let user = UserRepo::find_by_username(&pool, "sara").await.unwrap().unwrap();
    assert!(user.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_is_401(pool: PgPool) {
    initialize_site(&pool).await;
    create_user(&pool, "sara", ROLE_MEMBER_ID).await;

    let (status, json) = login(&pool, "sara", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, _) = login(&pool, "nobody", PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn banned_user_cannot_log_in(pool: PgPool) {
    initialize_site(&pool).await;
    let user = create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    ProfileRepo::ban(&pool, user.id, "spam").await.unwrap();

    let response = post_json_lang(
        &pool,
        "/login/",
        json!({ "username": "sara", "password": PASSWORD }),
        "en",
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Your account is banned");
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_session(pool: PgPool) {
    initialize_site(&pool).await;
    create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let (_, tokens) = login(&pool, "sara", PASSWORD).await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        build_test_app(pool.clone()),
        "/token/refresh/",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], tokens["refresh_token"]);

    // The old refresh token is spent.
    let reuse = post_json(
        build_test_app(pool),
        "/token/refresh/",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(reuse.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    initialize_site(&pool).await;
    create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let (_, tokens) = login(&pool, "sara", PASSWORD).await;
    let access = tokens["access_token"].as_str().unwrap();

    let response = post_empty(build_test_app(pool.clone()), "/logout/", Some(access)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let refresh = post_json(
        build_test_app(pool),
        "/token/refresh/",
        json!({ "refresh_token": tokens["refresh_token"] }),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_requires_token(pool: PgPool) {
    initialize_site(&pool).await;
    let response = get(build_test_app(pool.clone()), "/profile/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let garbage = get_auth(build_test_app(pool), "/profile/", "not-a-jwt").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_update_round_trip(pool: PgPool) {
    initialize_site(&pool).await;
    create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let (_, tokens) = login(&pool, "sara", PASSWORD).await;
    let access = tokens["access_token"].as_str().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/profile/",
        json!({ "first_name": "Sara", "phone": "0500000000", "language": "en" }),
        access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["first_name"], "Sara");
    assert_eq!(json["data"]["profile"]["phone"], "0500000000");
    assert_eq!(json["data"]["profile"]["preferred_language"], "en");

    let fetched = body_json(get_auth(build_test_app(pool), "/profile/", access).await).await;
    assert_eq!(fetched["data"]["user"]["username"], "sara");
    assert_eq!(fetched["data"]["user"]["role"], "member");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_rejects_unknown_language(pool: PgPool) {
    initialize_site(&pool).await;
    create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let (_, tokens) = login(&pool, "sara", PASSWORD).await;

    let response = put_json_auth(
        build_test_app(pool),
        "/profile/",
        json!({ "language": "fr" }),
        tokens["access_token"].as_str().unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
