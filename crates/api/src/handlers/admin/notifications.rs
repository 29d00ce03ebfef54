//! Notification authoring and sending.
//!
//! Sending only flags the broadcast; users receive it the next time they
//! open their inbox.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kobonat_core::error::CoreError;
use kobonat_core::types::DbId;
use kobonat_db::models::notification::{CreateNotification, UpdateNotification};
use kobonat_db::repositories::NotificationRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /notifications/send`.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub ids: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct SendResult {
    /// Rows that moved from draft to sent; already-sent ids are skipped.
    pub sent: u64,
}

/// GET /api/v1/admin/notifications
///
/// Each row carries its recipient and read counts.
pub async fn list_notifications(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items =
        NotificationRepo::list_with_stats(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/notifications
pub async fn create_notification(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<impl IntoResponse> {
    let created = NotificationRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, user_id = user.user_id, "Notification created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/admin/notifications/{id}
pub async fn get_notification(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Notification", id)))?;
    Ok(Json(DataResponse { data: notification }))
}

/// PUT /api/v1/admin/notifications/{id}
///
/// Content only; the sent state is changed through `send`.
/// `clear_target_store: true` drops the store target.
pub async fn update_notification(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNotification>,
) -> AppResult<impl IntoResponse> {
    let updated = NotificationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Notification", id)))?;
    tracing::info!(id, user_id = user.user_id, "Notification updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/notifications/{id}
pub async fn delete_notification(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NotificationRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Notification", id)));
    }
    tracing::info!(id, user_id = user.user_id, "Notification deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/notifications/send
pub async fn send_notifications(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SendRequest>,
) -> AppResult<impl IntoResponse> {
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }

    let sent = NotificationRepo::send(&state.pool, &input.ids).await?;
    tracing::info!(requested = input.ids.len(), sent, user_id = user.user_id, "Notifications sent");
    Ok(Json(DataResponse {
        data: SendResult { sent },
    }))
}
