//! Coupon management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kobonat_core::coupon::validate_discount_percentage;
use kobonat_core::error::CoreError;
use kobonat_core::types::DbId;
use kobonat_db::models::coupon::{CreateCoupon, UpdateCoupon};
use kobonat_db::repositories::CouponRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CouponListParams {
    pub store_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/coupons?store_id=&limit=&offset=
///
/// Active and inactive coupons with their store, newest first.
pub async fn list_coupons(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<CouponListParams>,
) -> AppResult<impl IntoResponse> {
    let page = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let items = CouponRepo::list(&state.pool, params.store_id, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/coupons
pub async fn create_coupon(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateCoupon>,
) -> AppResult<impl IntoResponse> {
    if let Some(pct) = input.discount_percentage {
        validate_discount_percentage(pct)?;
    }

    let created = CouponRepo::create(&state.pool, &input).await?;
    tracing::info!(
        id = created.id,
        code = %created.code,
        store_id = created.store_id,
        user_id = user.user_id,
        "Coupon created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/admin/coupons/{id}
pub async fn get_coupon(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let coupon = CouponRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Coupon", id)))?;
    Ok(Json(DataResponse { data: coupon }))
}

/// PUT /api/v1/admin/coupons/{id}
///
/// `clear_category: true` detaches the coupon from its category.
pub async fn update_coupon(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCoupon>,
) -> AppResult<impl IntoResponse> {
    if let Some(pct) = input.discount_percentage {
        validate_discount_percentage(pct)?;
    }

    let updated = CouponRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Coupon", id)))?;
    tracing::info!(id, user_id = user.user_id, "Coupon updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/coupons/{id}
pub async fn delete_coupon(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CouponRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Coupon", id)));
    }
    tracing::info!(id, user_id = user.user_id, "Coupon deleted");
    Ok(StatusCode::NO_CONTENT)
}
