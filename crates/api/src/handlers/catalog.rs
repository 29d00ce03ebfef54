//! Public catalog pages: home, stores, store detail, coupons, category.
//!
//! Every handler returns the localized page context as JSON.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kobonat_core::error::CoreError;
use kobonat_core::i18n::Lang;
use kobonat_core::pagination::PageWindow;
use kobonat_core::search::{contains_pattern, normalize_query, HOME_SECTION_LIMIT, HOME_SLIDER_LIMIT};
use kobonat_core::types::DbId;
use kobonat_db::models::coupon::CouponFilter;
use kobonat_db::repositories::{CategoryRepo, CouponRepo, SliderRepo, StoreRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::favorites::viewer_favorites;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::site::SiteContext;
use crate::query::{ListingParams, PageParams};
use crate::state::AppState;
use crate::views::{today, CategoryView, CouponView, SiteView, SliderView, StoreView};

// ---------------------------------------------------------------------------
// Page payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub lang: Lang,
    pub site: SiteView,
    pub slider_items: Vec<SliderView>,
    pub best_coupons: Vec<CouponView>,
    pub most_used_coupons: Vec<CouponView>,
    pub latest_coupons: Vec<CouponView>,
    pub featured_stores: Vec<StoreView>,
    pub categories: Vec<CategoryView>,
    pub user_favorites: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct MaintenancePage {
    pub maintenance: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StoresPage {
    pub lang: Lang,
    pub stores: Vec<StoreView>,
    pub pagination: PageWindow,
    pub search_query: String,
}

#[derive(Debug, Serialize)]
pub struct StoreDetailPage {
    pub lang: Lang,
    pub store: StoreView,
    pub coupons: Vec<CouponView>,
    pub user_favorites: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct CouponsPage {
    pub lang: Lang,
    pub coupons: Vec<CouponView>,
    pub pagination: PageWindow,
    pub categories: Vec<CategoryView>,
    pub stores: Vec<StoreView>,
    pub category_slug: Option<String>,
    pub store_slug: Option<String>,
    pub search_query: String,
    pub user_favorites: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub lang: Lang,
    pub category: CategoryView,
    pub coupons: Vec<CouponView>,
    pub pagination: PageWindow,
    pub user_favorites: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
///
/// Home page sections. Non-staff visitors get a 503 while the site is in
/// maintenance mode.
pub async fn home(
    State(state): State<AppState>,
    site: SiteContext,
    viewer: MaybeAuthUser,
) -> AppResult<Response> {
    let settings = &site.settings;
    if settings.maintenance_mode && !viewer.is_staff() {
        let body = MaintenancePage {
            maintenance: true,
            message: settings.maintenance_message.clone(),
        };
        return Ok((StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response());
    }

    let pool = &state.pool;
    let lang = site.lang;
    let today = today();

    let slider = SliderRepo::list_active(pool, HOME_SLIDER_LIMIT).await?;
    let best = CouponRepo::list_best_offers(pool, HOME_SECTION_LIMIT).await?;
    let most_used = CouponRepo::list_most_used(pool, HOME_SECTION_LIMIT).await?;
    let latest = CouponRepo::list_latest(pool, HOME_SECTION_LIMIT).await?;
    let featured = StoreRepo::list_featured(pool, HOME_SECTION_LIMIT).await?;
    let categories = CategoryRepo::list_active(pool, Some(HOME_SECTION_LIMIT)).await?;
    let user_favorites = viewer_favorites(pool, &viewer).await?;

    let page = HomePage {
        lang,
        site: SiteView::new(settings, lang),
        slider_items: slider.iter().map(|s| SliderView::new(s, lang)).collect(),
        best_coupons: CouponView::list(&best, lang, today),
        most_used_coupons: CouponView::list(&most_used, lang, today),
        latest_coupons: CouponView::list(&latest, lang, today),
        featured_stores: featured.iter().map(|s| StoreView::new(s, lang)).collect(),
        categories: categories.iter().map(|c| CategoryView::new(c, lang)).collect(),
        user_favorites,
    };
    Ok(Json(page).into_response())
}

/// GET /stores/?q=&page=
///
/// Active stores, optionally filtered by name.
pub async fn list_stores(
    State(state): State<AppState>,
    site: SiteContext,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<StoresPage>> {
    let query = normalize_query(params.q.as_deref());
    let pattern = query.map(contains_pattern);

    let total = StoreRepo::count_active(&state.pool, pattern.as_deref()).await?;
    let window = PageWindow::new(
        params.page.as_deref(),
        i64::from(site.settings.stores_per_page),
        total,
    );
    let stores = StoreRepo::list_active(
        &state.pool,
        pattern.as_deref(),
        Some(window.limit()),
        window.offset(),
    )
    .await?;

    Ok(Json(StoresPage {
        lang: site.lang,
        stores: stores.iter().map(|s| StoreView::new(s, site.lang)).collect(),
        pagination: window,
        search_query: query.unwrap_or_default().to_string(),
    }))
}

/// GET /store/{slug}/
///
/// One active store with its active coupons. Counts as a store click.
pub async fn store_detail(
    State(state): State<AppState>,
    site: SiteContext,
    viewer: MaybeAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<StoreDetailPage>> {
    let mut store = StoreRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Store", &slug))?;

    StoreRepo::increment_click_count(&state.pool, store.id).await?;
    store.click_count += 1;

    let coupons = CouponRepo::list_for_store(&state.pool, store.id).await?;
    let user_favorites = viewer_favorites(&state.pool, &viewer).await?;

    Ok(Json(StoreDetailPage {
        lang: site.lang,
        store: StoreView::new(&store, site.lang),
        coupons: CouponView::list(&coupons, site.lang, today()),
        user_favorites,
    }))
}

/// GET /coupons/?category=&store=&q=&page=
///
/// Active coupons with the filter widgets' category and store lists.
pub async fn list_coupons(
    State(state): State<AppState>,
    site: SiteContext,
    viewer: MaybeAuthUser,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<CouponsPage>> {
    let pool = &state.pool;
    let lang = site.lang;

    let query = normalize_query(params.q.as_deref());
    let category_slug = normalize_query(params.category.as_deref());
    let store_slug = normalize_query(params.store.as_deref());
    let filter = CouponFilter {
        category_slug,
        store_slug,
        query,
    };

    let total = CouponRepo::count_filtered(pool, &filter).await?;
    let window = PageWindow::new(
        params.page.as_deref(),
        i64::from(site.settings.coupons_per_page),
        total,
    );
    let coupons = CouponRepo::list_filtered(pool, &filter, window.limit(), window.offset()).await?;

    let categories = CategoryRepo::list_active(pool, None).await?;
    let stores = StoreRepo::list_active(pool, None, None, 0).await?;
    let user_favorites = viewer_favorites(pool, &viewer).await?;

    Ok(Json(CouponsPage {
        lang,
        coupons: CouponView::list(&coupons, lang, today()),
        pagination: window,
        categories: categories.iter().map(|c| CategoryView::new(c, lang)).collect(),
        stores: stores.iter().map(|s| StoreView::new(s, lang)).collect(),
        category_slug: category_slug.map(str::to_string),
        store_slug: store_slug.map(str::to_string),
        search_query: query.unwrap_or_default().to_string(),
        user_favorites,
    }))
}

/// GET /category/{slug}/?page=
///
/// One active category and a page of its active coupons.
pub async fn category_coupons(
    State(state): State<AppState>,
    site: SiteContext,
    viewer: MaybeAuthUser,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<CategoryPage>> {
    let pool = &state.pool;
    let category = CategoryRepo::find_active_by_slug(pool, &slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", &slug))?;

    let filter = CouponFilter {
        category_slug: Some(&category.slug),
        ..Default::default()
    };
    let total = CouponRepo::count_filtered(pool, &filter).await?;
    let window = PageWindow::new(
        params.page.as_deref(),
        i64::from(site.settings.coupons_per_page),
        total,
    );
    let coupons = CouponRepo::list_filtered(pool, &filter, window.limit(), window.offset()).await?;
    let user_favorites = viewer_favorites(pool, &viewer).await?;

    Ok(Json(CategoryPage {
        lang: site.lang,
        category: CategoryView::new(&category, site.lang),
        coupons: CouponView::list(&coupons, site.lang, today()),
        pagination: window,
        user_favorites,
    }))
}
