//! Coupon copy action.

use axum::extract::{Path, State};
use axum::Json;
use kobonat_core::coupon::redirect_url;
use kobonat_core::error::CoreError;
use kobonat_core::types::DbId;
use kobonat_core::usage::UsageAction;
use kobonat_db::models::usage::NewCouponUsage;
use kobonat_db::repositories::CouponRepo;
use serde::Serialize;

use crate::error::ActionResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::client::ClientMeta;
use crate::response::ActionResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CopyFields {
    pub code: String,
    pub redirect_url: String,
}

/// POST /copy-coupon/{id}/
///
/// Log a `copy` event for an active coupon and bump its used count, then
/// hand back the code and the outbound link. Anonymous visitors allowed.
pub async fn copy_coupon(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    client: ClientMeta,
    Path(coupon_id): Path<DbId>,
) -> ActionResult<Json<ActionResponse<CopyFields>>> {
    let usage = NewCouponUsage {
        coupon_id,
        user_id: viewer.user_id(),
        action: UsageAction::Copy,
        ip_address: client.ip,
        user_agent: client.user_agent,
        device_type: client.device_type,
    };

    let row = CouponRepo::record_copy(&state.pool, &usage)
        .await?
        .ok_or_else(|| CoreError::not_found("Coupon", coupon_id))?;

    tracing::info!(
        coupon_id,
        user_id = ?usage.user_id,
        device = usage.device_type.as_str(),
        "Coupon copied"
    );

    Ok(Json(ActionResponse::ok(CopyFields {
        redirect_url: redirect_url(&row.coupon.affiliate_url, &row.store_url).to_string(),
        code: row.coupon.code,
    })))
}
