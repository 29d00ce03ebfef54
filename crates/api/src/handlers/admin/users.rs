//! User administration: listing and bans.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use kobonat_core::error::CoreError;
use kobonat_core::types::DbId;
use kobonat_db::repositories::{ProfileRepo, SessionRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BanRequest {
    #[serde(default)]
    pub reason: String,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items = UserRepo::list_overview(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/users/{id}/ban
///
/// Flags the profile and revokes the user's sessions.
pub async fn ban_user(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<BanRequest>,
) -> AppResult<impl IntoResponse> {
    if id == staff.user_id {
        return Err(AppError::BadRequest("You cannot ban yourself".into()));
    }

    let profile = ProfileRepo::ban(&state.pool, id, input.reason.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, by = staff.user_id, revoked, "User banned");
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/admin/users/{id}/unban
pub async fn unban_user(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::unban(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;

    tracing::info!(user_id = id, by = staff.user_id, "User unbanned");
    Ok(Json(DataResponse { data: profile }))
}
