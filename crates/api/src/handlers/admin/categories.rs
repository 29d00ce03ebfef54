//! Category management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kobonat_core::error::CoreError;
use kobonat_core::slug::validate_slug;
use kobonat_core::types::DbId;
use kobonat_db::models::category::{Category, CreateCategory, UpdateCategory};
use kobonat_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_category_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Category> {
    CategoryRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))
}

/// GET /api/v1/admin/categories
pub async fn list_categories(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items = CategoryRepo::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/categories
pub async fn create_category(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&input.slug)?;

    let created = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, slug = %created.slug, user_id = user.user_id, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get_category(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = ensure_category_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/admin/categories/{id}
///
/// The slug cannot change once coupons reference the category.
pub async fn update_category(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let current = ensure_category_exists(&state.pool, id).await?;

    if let Some(slug) = input.slug.as_deref() {
        validate_slug(slug)?;
        if slug != current.slug && CategoryRepo::is_referenced(&state.pool, id).await? {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Category '{}' is used by coupons; its slug cannot change",
                current.slug
            ))));
        }
    }

    let updated = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))?;
    tracing::info!(id, user_id = user.user_id, "Category updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Coupons of the category stay and lose their category.
pub async fn delete_category(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Category", id)));
    }
    tracing::info!(id, user_id = user.user_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
