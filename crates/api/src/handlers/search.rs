//! Site search: the results page and the header typeahead.

use axum::extract::{Query, State};
use axum::Json;
use kobonat_core::i18n::{Lang, Localizable};
use kobonat_core::search::{
    contains_pattern, is_typeahead_query, normalize_query, SEARCH_COUPON_LIMIT,
    SEARCH_STORE_LIMIT, TYPEAHEAD_COUPON_LIMIT, TYPEAHEAD_STORE_LIMIT,
};
use kobonat_core::types::DbId;
use kobonat_db::models::coupon::CouponField;
use kobonat_db::models::store::StoreField;
use kobonat_db::repositories::{CouponRepo, StoreRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::favorites::viewer_favorites;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::site::SiteContext;
use crate::query::SearchParams;
use crate::state::AppState;
use crate::views::{today, CouponView, StoreView};

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub lang: Lang,
    pub query: String,
    pub coupons: Vec<CouponView>,
    pub stores: Vec<StoreView>,
    pub user_favorites: Vec<DbId>,
}

/// One typeahead suggestion; coupons are listed before stores.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Suggestion {
    Coupon {
        title: String,
        code: String,
        store: String,
        discount: i32,
        url: String,
    },
    Store {
        title: String,
        logo: String,
        url: String,
    },
}

#[derive(Debug, Serialize)]
pub struct Suggestions {
    pub results: Vec<Suggestion>,
}

/// GET /search/?q=
///
/// Up to 20 coupons and 10 stores. An empty query returns no results.
pub async fn search_page(
    State(state): State<AppState>,
    site: SiteContext,
    viewer: MaybeAuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchPage>> {
    let query = normalize_query(params.q.as_deref());
    let (coupons, stores) = match query {
        Some(q) => {
            let pattern = contains_pattern(q);
            let coupons = CouponRepo::search(&state.pool, &pattern, SEARCH_COUPON_LIMIT).await?;
            let stores = StoreRepo::list_active(
                &state.pool,
                Some(&pattern),
                Some(SEARCH_STORE_LIMIT),
                0,
            )
            .await?;
            (coupons, stores)
        }
        None => (Vec::new(), Vec::new()),
    };
    let user_favorites = viewer_favorites(&state.pool, &viewer).await?;

    Ok(Json(SearchPage {
        lang: site.lang,
        query: query.unwrap_or_default().to_string(),
        coupons: CouponView::list(&coupons, site.lang, today()),
        stores: stores.iter().map(|s| StoreView::new(s, site.lang)).collect(),
        user_favorites,
    }))
}

/// GET /api/search/?q=
///
/// Typeahead suggestions. Queries shorter than two characters return an
/// empty list without touching the database.
pub async fn search_suggestions(
    State(state): State<AppState>,
    site: SiteContext,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Suggestions>> {
    let Some(query) = normalize_query(params.q.as_deref()).filter(|q| is_typeahead_query(q))
    else {
        return Ok(Json(Suggestions {
            results: Vec::new(),
        }));
    };

    let lang = site.lang;
    let pattern = contains_pattern(query);
    let coupons = CouponRepo::typeahead(&state.pool, &pattern, TYPEAHEAD_COUPON_LIMIT).await?;
    let stores =
        StoreRepo::list_active(&state.pool, Some(&pattern), Some(TYPEAHEAD_STORE_LIMIT), 0)
            .await?;

    let coupon_hits = coupons.iter().map(|row| Suggestion::Coupon {
        title: row.coupon.localized_string(CouponField::Title, lang),
        code: row.coupon.code.clone(),
        store: row.store_display_name(lang).to_string(),
        discount: row.coupon.discount_percentage,
        url: format!("/coupons/?q={}", row.coupon.code),
    });
    let store_hits = stores.iter().map(|store| Suggestion::Store {
        title: store.localized_string(StoreField::Name, lang),
        logo: store.logo.clone().unwrap_or_default(),
        url: format!("/store/{}/", store.slug),
    });

    Ok(Json(Suggestions {
        results: coupon_hits.chain(store_hits).collect(),
    }))
}
