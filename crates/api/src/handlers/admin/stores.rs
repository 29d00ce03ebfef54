//! Store management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kobonat_core::error::CoreError;
use kobonat_core::slug::validate_slug;
use kobonat_core::types::DbId;
use kobonat_db::models::store::{CreateStore, UpdateStore};
use kobonat_db::repositories::StoreRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/stores
pub async fn list_stores(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items = StoreRepo::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/stores
pub async fn create_store(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateStore>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&input.slug)?;

    let created = StoreRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, slug = %created.slug, user_id = user.user_id, "Store created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/admin/stores/{id}
pub async fn get_store(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let store = StoreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Store", id)))?;
    Ok(Json(DataResponse { data: store }))
}

/// PUT /api/v1/admin/stores/{id}
pub async fn update_store(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStore>,
) -> AppResult<impl IntoResponse> {
    if let Some(slug) = input.slug.as_deref() {
        validate_slug(slug)?;
    }

    let updated = StoreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Store", id)))?;
    tracing::info!(id, user_id = user.user_id, "Store updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/stores/{id}
///
/// Deletes the store's coupons with it.
pub async fn delete_store(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !StoreRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Store", id)));
    }
    tracing::info!(id, user_id = user.user_id, "Store deleted");
    Ok(StatusCode::NO_CONTENT)
}
