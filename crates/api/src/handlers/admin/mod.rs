//! Back-office JSON handlers, mounted under `/api/v1/admin`.
//!
//! Every handler takes [`RequireStaff`](crate::middleware::rbac::RequireStaff).

pub mod categories;
pub mod contact;
pub mod coupons;
pub mod notifications;
pub mod settings;
pub mod slider;
pub mod stores;
pub mod usage;
pub mod users;
