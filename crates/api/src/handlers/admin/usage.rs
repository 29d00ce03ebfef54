//! Read-only coupon usage log.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use kobonat_core::types::DbId;
use kobonat_db::repositories::UsageRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UsageListParams {
    pub coupon_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/usage?coupon_id=&limit=&offset=
pub async fn list_usage(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<UsageListParams>,
) -> AppResult<impl IntoResponse> {
    let page = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let items = UsageRepo::list(&state.pool, params.coupon_id, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}
