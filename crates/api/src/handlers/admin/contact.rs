//! Contact inbox.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use kobonat_core::error::CoreError;
use kobonat_core::types::DbId;
use kobonat_db::repositories::ContactRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactListParams {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub reply_message: String,
}

/// GET /api/v1/admin/contact-messages?unread_only=
pub async fn list_messages(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ContactListParams>,
) -> AppResult<impl IntoResponse> {
    let page = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let items =
        ContactRepo::list(&state.pool, params.unread_only, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/contact-messages/{id}/read
pub async fn mark_message_read(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = ContactRepo::mark_read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ContactMessage", id)))?;
    Ok(Json(DataResponse { data: message }))
}

/// POST /api/v1/admin/contact-messages/{id}/reply
///
/// Records the reply text; delivering it is out of band.
pub async fn reply_to_message(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReplyRequest>,
) -> AppResult<impl IntoResponse> {
    let reply = input.reply_message.trim();
    if reply.is_empty() {
        return Err(AppError::BadRequest("reply_message must not be empty".into()));
    }

    let message = ContactRepo::reply(&state.pool, id, reply)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ContactMessage", id)))?;
    tracing::info!(id, user_id = user.user_id, "Contact message replied");
    Ok(Json(DataResponse { data: message }))
}
