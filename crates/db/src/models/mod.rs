//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Entities with Arabic/English column pairs implement
//! [`kobonat_core::i18n::Localizable`].

pub mod category;
pub mod contact;
pub mod coupon;
pub mod favorite;
pub mod notification;
pub mod profile;
pub mod role;
pub mod session;
pub mod settings;
pub mod slider;
pub mod store;
pub mod usage;
pub mod user;
