//! Favorite (user, coupon) pairs.

use kobonat_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::coupon::CouponWithStore;

/// A row from the `favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub coupon_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A favorite with the coupon and store it points at.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FavoriteEntry {
    pub favorite_id: DbId,
    pub favorited_at: Timestamp,
    #[sqlx(flatten)]
    pub coupon: CouponWithStore,
}

/// Result of toggling a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}
