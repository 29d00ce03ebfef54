//! Favorites: toggle from a coupon card and the "my favorites" page.

use axum::extract::{Path, State};
use axum::Json;
use kobonat_core::error::CoreError;
use kobonat_core::i18n::Lang;
use kobonat_core::types::DbId;
use kobonat_db::repositories::{CouponRepo, FavoriteRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{ActionResult, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::site::SiteContext;
use crate::response::ActionResponse;
use crate::state::AppState;
use crate::views::{today, FavoriteView};

#[derive(Debug, Serialize)]
pub struct ToggleFields {
    pub action: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FavoritesPage {
    pub lang: Lang,
    pub favorites: Vec<FavoriteView>,
}

/// Coupon ids the viewer has favorited; empty for anonymous visitors.
pub(crate) async fn viewer_favorites(
    pool: &PgPool,
    viewer: &MaybeAuthUser,
) -> Result<Vec<DbId>, sqlx::Error> {
    match viewer.user_id() {
        Some(user_id) => FavoriteRepo::coupon_ids_for_user(pool, user_id).await,
        None => Ok(Vec::new()),
    }
}

/// POST /toggle-favorite/{id}/
///
/// Add the coupon to the caller's favorites, or remove it if present.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    site: SiteContext,
    Path(coupon_id): Path<DbId>,
) -> ActionResult<Json<ActionResponse<ToggleFields>>> {
    let user = viewer.require()?;
    site.require_favorites()?;

    CouponRepo::find_by_id(&state.pool, coupon_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Coupon", coupon_id))?;

    let outcome = FavoriteRepo::toggle(&state.pool, user.user_id, coupon_id).await?;
    tracing::info!(
        user_id = user.user_id,
        coupon_id,
        action = outcome.as_str(),
        "Favorite toggled"
    );

    Ok(Json(ActionResponse::ok(ToggleFields {
        action: outcome.as_str(),
    })))
}

/// GET /favorites/
///
/// The caller's favorites with coupon and store, newest first.
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    site: SiteContext,
) -> AppResult<Json<FavoritesPage>> {
    site.require_favorites()?;

    let entries = FavoriteRepo::list_for_user(&state.pool, user.user_id).await?;
    let today = today();

    Ok(Json(FavoritesPage {
        lang: site.lang,
        favorites: entries
            .iter()
            .map(|entry| FavoriteView::new(entry, site.lang, today))
            .collect(),
    }))
}
