//! Domain logic for the Kobonat coupon site.
//!
//! Everything in this crate is pure: no I/O, no database access. The `db`
//! and `api` crates build on these types and rules.

pub mod accounts;
pub mod coupon;
pub mod error;
pub mod i18n;
pub mod pagination;
pub mod roles;
pub mod search;
pub mod settings;
pub mod setup;
pub mod slug;
pub mod types;
pub mod usage;
