//! Public site routes, mounted at the root.
//!
//! ```text
//! GET    /                                 home
//! GET    /stores/                          list_stores
//! GET    /store/{slug}/                    store_detail
//! GET    /coupons/                         list_coupons
//! GET    /category/{slug}/                 category_coupons
//! GET    /search/                          search_page
//! GET    /api/search/                      search_suggestions
//! POST   /copy-coupon/{id}/                copy_coupon
//! POST   /toggle-favorite/{id}/            toggle_favorite
//! GET    /favorites/                       list_favorites
//! GET    /notifications/                   list_notifications
//! POST   /notifications/read-all/          mark_all_read
//! POST   /mark-notification-read/{id}/     mark_read
//! GET    /api/notifications/count/         unread_count
//! GET    /about/  /privacy/  /terms/       static pages
//! GET    /contact/                         contact_page
//! POST   /contact/                         submit_contact
//! GET    /set-language/{lang}              set_language
//! GET    /setup/                           setup_form
//! POST   /setup/                           complete_setup
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, favorites, language, notifications, pages, search, setup, usage};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Catalog.
        .route("/", get(catalog::home))
        .route("/stores/", get(catalog::list_stores))
        .route("/store/{slug}/", get(catalog::store_detail))
        .route("/coupons/", get(catalog::list_coupons))
        .route("/category/{slug}/", get(catalog::category_coupons))
        // Search.
        .route("/search/", get(search::search_page))
        .route("/api/search/", get(search::search_suggestions))
        // Coupon actions and favorites.
        .route("/copy-coupon/{id}/", post(usage::copy_coupon))
        .route("/toggle-favorite/{id}/", post(favorites::toggle_favorite))
        .route("/favorites/", get(favorites::list_favorites))
        // Notifications.
        .route("/notifications/", get(notifications::list_notifications))
        .route("/notifications/read-all/", post(notifications::mark_all_read))
        .route(
            "/mark-notification-read/{id}/",
            post(notifications::mark_read),
        )
        .route("/api/notifications/count/", get(notifications::unread_count))
        // Static pages.
        .route("/about/", get(pages::about))
        .route("/privacy/", get(pages::privacy))
        .route("/terms/", get(pages::terms))
        .route(
            "/contact/",
            get(pages::contact_page).post(pages::submit_contact),
        )
        // Language and first-run setup.
        .route("/set-language/{lang}", get(language::set_language))
        .route(
            "/setup/",
            get(setup::setup_form).post(setup::complete_setup),
        )
}
