//! Shared fixtures for db integration tests.

#![allow(dead_code)]

use kobonat_core::roles::ROLE_MEMBER_ID;
use kobonat_core::types::DbId;
use kobonat_db::models::coupon::{Coupon, CreateCoupon};
use kobonat_db::models::notification::CreateNotification;
use kobonat_db::models::store::{CreateStore, Store};
use kobonat_db::models::user::{CreateUser, User};
use kobonat_db::repositories::{CouponRepo, NotificationRepo, StoreRepo, UserRepo};
use sqlx::PgPool;

pub async fn member(pool: &PgPool, username: &str) -> User {
    UserRepo::create_with_profile(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role_id: ROLE_MEMBER_ID,
        },
        None,
    )
    .await
    .unwrap()
}

pub async fn store(pool: &PgPool, slug: &str, name: &str) -> Store {
    StoreRepo::create(
        pool,
        &CreateStore {
            name: name.to_string(),
            name_en: None,
            slug: slug.to_string(),
            logo: None,
            cover_image: None,
            url: format!("https://{slug}.example.com"),
            description: None,
            description_en: None,
            is_featured: None,
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
        title_en: None,
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
    let n = NotificationRepo::create(
        pool,
        &CreateNotification {
            title: title.to_string(),
            title_en: None,
            message: "رسالة".to_string(),
            message_en: None,
            image: None,
            link: None,
            target_store_id: None,
            send_to_all: None,
        },
    )
    .await
    .unwrap();
    NotificationRepo::send(pool, &[n.id]).await.unwrap();
    n.id
}
