//! Home slider management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kobonat_core::error::CoreError;
use kobonat_core::types::DbId;
use kobonat_db::models::slider::{CreateSliderItem, UpdateSliderItem};
use kobonat_db::repositories::SliderRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/slider
pub async fn list_slides(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items = SliderRepo::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/slider
pub async fn create_slide(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateSliderItem>,
) -> AppResult<impl IntoResponse> {
    let created = SliderRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, user_id = user.user_id, "Slider item created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/admin/slider/{id}
pub async fn get_slide(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = SliderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SliderItem", id)))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/admin/slider/{id}
pub async fn update_slide(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSliderItem>,
) -> AppResult<impl IntoResponse> {
    let updated = SliderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SliderItem", id)))?;
    tracing::info!(id, user_id = user.user_id, "Slider item updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/slider/{id}
pub async fn delete_slide(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SliderRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("SliderItem", id)));
    }
    tracing::info!(id, user_id = user.user_id, "Slider item deleted");
    Ok(StatusCode::NO_CONTENT)
}
