//! Account routes, mounted at the root.
//!
//! ```text
//! POST   /register/          register
//! POST   /login/             login
//! POST   /token/refresh/     refresh
//! POST   /logout/            logout (requires auth)
//! GET    /profile/           get_profile (requires auth)
//! PUT    /profile/           update_profile (requires auth)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/", post(accounts::register))
        .route("/login/", post(accounts::login))
        .route("/token/refresh/", post(accounts::refresh))
        .route("/logout/", post(accounts::logout))
        .route(
            "/profile/",
            get(accounts::get_profile).put(accounts::update_profile),
        )
}
