//! Shared harness for HTTP integration tests.
//!
//! Builds the production router over the test pool and drives it with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use kobonat_api::auth::jwt::{generate_access_token, JwtConfig};
use kobonat_api::auth::password::hash_password;
use kobonat_api::config::ServerConfig;
use kobonat_api::router::build_app_router;
use kobonat_api::state::AppState;
use kobonat_core::roles::{ROLE_ADMIN, ROLE_ADMIN_ID, ROLE_MEMBER, ROLE_STAFF, ROLE_STAFF_ID};
use kobonat_core::types::DbId;
use kobonat_db::models::coupon::{Coupon, CreateCoupon};
use kobonat_db::models::notification::CreateNotification;
use kobonat_db::models::settings::UpdateSettings;
use kobonat_db::models::store::{CreateStore, Store};
use kobonat_db::models::user::{CreateUser, User};
use kobonat_db::repositories::{CouponRepo, NotificationRepo, SettingsRepo, StoreRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

/// Plaintext password of every user created by [`create_user`].
pub const PASSWORD: &str = "kobonat-pass-123";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "kobonat-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

/// GET with a raw `Cookie` header, e.g. `lang=en`.
pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

/// Bodyless POST, as the AJAX actions send it.
pub async fn post_empty(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, request(Method::POST, uri, token, None)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user (with profile) whose password is [`PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str, role_id: DbId) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(PASSWORD).unwrap(),
        role_id,
    };
    UserRepo::create_with_profile(pool, &input, None).await.unwrap()
}

/// Create the first administrator so the setup gate lets traffic through.
pub async fn initialize_site(pool: &PgPool) -> User {
    create_user(pool, "admin", ROLE_ADMIN_ID).await
}

/// Access token for `user`, signed with the test secret.
pub fn token_for(user: &User) -> String {
    let role = match user.role_id {
        ROLE_ADMIN_ID => ROLE_ADMIN,
        ROLE_STAFF_ID => ROLE_STAFF,
        _ => ROLE_MEMBER,
    };
    generate_access_token(user.id, role, &test_config().jwt).unwrap()
}

pub async fn update_settings(pool: &PgPool, patch: UpdateSettings) {
    SettingsRepo::update(pool, &patch).await.unwrap();
}

pub async fn store(pool: &PgPool, slug: &str, name: &str, name_en: &str) -> Store {
    StoreRepo::create(
        pool,
        &CreateStore {
            name: name.to_string(),
            name_en: Some(name_en.to_string()),
            slug: slug.to_string(),
            logo: Some(format!("stores/{slug}.png")),
            cover_image: None,
            url: format!("https://{slug}.example.com"),
            description: None,
            description_en: None,
            is_featured: Some(true),
            is_active: None,
            sort_order: None,
        },
    )
    .await
    .unwrap()
}

pub fn coupon_input(store_id: DbId, code: &str) -> CreateCoupon {
    CreateCoupon {
        store_id,
        category_id: None,
        title: format!("خصم {code}"),
        title_en: Some(format!("{code} deal")),
        code: code.to_string(),
        discount_percentage: Some(10),
        discount_value: None,
        description: None,
        description_en: None,
        image: None,
        affiliate_url: None,
        expiry_date: None,
        is_active: None,
        is_best_offer: None,
        is_most_used: None,
        is_exclusive: None,
        is_verified: None,
    }
}

pub async fn coupon(pool: &PgPool, store_id: DbId, code: &str) -> Coupon {
    CouponRepo::create(pool, &coupon_input(store_id, code))
        .await
        .unwrap()
}

/// Create and send a broadcast notification.
pub async fn sent_broadcast(pool: &PgPool, title: &str) -> DbId {
    let notification = NotificationRepo::create(
        pool,
        &CreateNotification {
            title: title.to_string(),
            title_en: Some(format!("{title} (en)")),
            message: format!("{title} body"),
            message_en: None,
            image: None,
            link: None,
            target_store_id: None,
            send_to_all: None,
        },
    )
    .await
    .unwrap();
    NotificationRepo::send(pool, &[notification.id]).await.unwrap();
    notification.id
}
