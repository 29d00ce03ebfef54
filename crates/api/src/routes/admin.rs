//! Back-office routes, mounted at `/api/v1/admin`. All require staff.
//!
//! ```text
//! GET, POST          /categories            GET, PUT, DELETE  /categories/{id}
//! GET, POST          /stores                GET, PUT, DELETE  /stores/{id}
//! GET, POST          /coupons               GET, PUT, DELETE  /coupons/{id}
//! GET, POST          /slider                GET, PUT, DELETE  /slider/{id}
//! GET, POST          /notifications         GET, PUT, DELETE  /notifications/{id}
//! POST               /notifications/send
//! GET, PUT           /settings
//! GET                /users
//! POST               /users/{id}/ban        POST  /users/{id}/unban
//! GET                /contact-messages
//! POST               /contact-messages/{id}/read
//! POST               /contact-messages/{id}/reply
//! GET                /usage
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin::{
    categories, contact, coupons, notifications, settings, slider, stores, usage, users,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/stores",
            get(stores::list_stores).post(stores::create_store),
        )
        .route(
            "/stores/{id}",
            get(stores::get_store)
                .put(stores::update_store)
                .delete(stores::delete_store),
        )
        .route(
            "/coupons",
            get(coupons::list_coupons).post(coupons::create_coupon),
        )
        .route(
            "/coupons/{id}",
            get(coupons::get_coupon)
                .put(coupons::update_coupon)
                .delete(coupons::delete_coupon),
        )
        .route(
            "/slider",
            get(slider::list_slides).post(slider::create_slide),
        )
        .route(
            "/slider/{id}",
            get(slider::get_slide)
                .put(slider::update_slide)
                .delete(slider::delete_slide),
        )
        .route(
            "/notifications",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route(
            "/notifications/send",
            post(notifications::send_notifications),
        )
        .route(
            "/notifications/{id}",
            get(notifications::get_notification)
                .put(notifications::update_notification)
                .delete(notifications::delete_notification),
        )
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/users", get(users::list_users))
        .route("/users/{id}/ban", post(users::ban_user))
        .route("/users/{id}/unban", post(users::unban_user))
        .route("/contact-messages", get(contact::list_messages))
        .route(
            "/contact-messages/{id}/read",
            post(contact::mark_message_read),
        )
        .route(
            "/contact-messages/{id}/reply",
            post(contact::reply_to_message),
        )
        .route("/usage", get(usage::list_usage))
}
