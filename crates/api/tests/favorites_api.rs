//! Integration tests for the favorite toggle and favorites page.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, coupon, create_user, get, get_auth, initialize_site, post_empty,
    store, token_for, update_settings,
};
use kobonat_core::roles::ROLE_MEMBER_ID;
use kobonat_db::models::coupon::UpdateCoupon;
use kobonat_db::models::settings::UpdateSettings;
use kobonat_db::repositories::CouponRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_adds_then_removes(pool: PgPool) {
    initialize_site(&pool).await;
    let member = create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let token = token_for(&member);
    let noon = store(&pool, "noon", "نون", "Noon").await;
    let c = coupon(&pool, noon.id, "NOON15").await;
    let uri = format!("/toggle-favorite/{}/", c.id);

    let added = post_empty(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(added.status(), StatusCode::OK);
    let json = body_json(added).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["action"], "added");

    let home = body_json(get_auth(build_test_app(pool.clone()), "/", &token).await).await;
    assert_eq!(home["user_favorites"], serde_json::json!([c.id]));

    let removed = post_empty(build_test_app(pool.clone()), &uri, Some(&token)).await;
    let json = body_json(removed).await;
    assert_eq!(json["action"], "removed");

    let page = body_json(get_auth(build_test_app(pool), "/favorites/", &token).await).await;
    assert_eq!(page["favorites"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_toggle_is_unauthorized(pool: PgPool) {
    initialize_site(&pool).await;
    let noon = store(&pool, "noon", "نون", "Noon").await;
    let c = coupon(&pool, noon.id, "NOON15").await;

    let response = post_empty(
        build_test_app(pool),
        &format!("/toggle-favorite/{}/", c.id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_unknown_coupon_is_404(pool: PgPool) {
    initialize_site(&pool).await;
    let member = create_user(&pool, "sara", ROLE_MEMBER_ID).await;

    let response = post_empty(
        build_test_app(pool),
        "/toggle-favorite/999999/",
        Some(&token_for(&member)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"success": false, "error": "NOT_FOUND"}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn disabled_favorites_are_forbidden(pool: PgPool) {
    initialize_site(&pool).await;
    let member = create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let token = token_for(&member);
    let noon = store(&pool, "noon", "نون", "Noon").await;
    let c = coupon(&pool, noon.id, "NOON15").await;
    update_settings(
        &pool,
        UpdateSettings {
            enable_favorites: Some(false),
            ..Default::default()
        },
    )
    .await;

    let toggle = post_empty(
        build_test_app(pool.clone()),
        &format!("/toggle-favorite/{}/", c.id),
        Some(&token),
    )
    .await;
    assert_eq!(toggle.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(toggle).await["error"], "FEATURE_DISABLED");

    let page = get_auth(build_test_app(pool), "/favorites/", &token).await;
    assert_eq!(page.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(page).await["code"], "FEATURE_DISABLED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn favorites_page_keeps_deactivated_coupons(pool: PgPool) {
    initialize_site(&pool).await;
    let member = create_user(&pool, "sara", ROLE_MEMBER_ID).await;
    let token = token_for(&member);
    let noon = store(&pool, "noon", "نون", "Noon").await;
    let c = coupon(&pool, noon.id, "NOON15").await;

    post_empty(
        build_test_app(pool.clone()),
        &format!("/toggle-favorite/{}/", c.id),
        Some(&token),
    )
    .await;
    CouponRepo::update(
        &pool,
        c.id,
        &UpdateCoupon {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let page = body_json(get_auth(build_test_app(pool), "/favorites/", &token).await).await;
    let favorites = page["favorites"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["is_available"], false);
    assert_eq!(favorites[0]["coupon"]["code"], "NOON15");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn favorites_page_requires_login(pool: PgPool) {
    initialize_site(&pool).await;
    let response = get(build_test_app(pool), "/favorites/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
