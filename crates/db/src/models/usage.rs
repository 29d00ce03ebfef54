//! Append-only coupon usage log.

use kobonat_core::types::{DbId, Timestamp};
use kobonat_core::usage::{DeviceType, UsageAction};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `coupon_usages` table. Rows are never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CouponUsage {
    pub id: DbId,
    pub coupon_id: DbId,
    pub user_id: Option<DbId>,
    pub action: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub device_type: String,
    pub created_at: Timestamp,
}

/// Input for recording one usage event.
#[derive(Debug, Clone)]
pub struct NewCouponUsage {
    pub coupon_id: DbId,
    pub user_id: Option<DbId>,
    pub action: UsageAction,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub device_type: DeviceType,
}
