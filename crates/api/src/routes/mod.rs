pub mod accounts;
pub mod admin;
pub mod health;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Build the page and API route tree.
///
/// ```text
/// /                    public site (catalog, search, favorites, inbox, pages, setup)
/// /                    accounts (register, login, token refresh, logout, profile)
/// /api/v1/admin        back office
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(site::router())
        .merge(accounts::router())
        .nest("/api/v1/admin", admin::router())
}
