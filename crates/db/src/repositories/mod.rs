//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument. Multi-statement operations
//! open their own transaction.

pub mod category_repo;
pub mod contact_repo;
pub mod coupon_repo;
pub mod favorite_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod role_repo;
pub mod session_repo;
pub mod settings_repo;
pub mod setup_repo;
pub mod slider_repo;
pub mod store_repo;
pub mod usage_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use contact_repo::ContactRepo;
pub use coupon_repo::CouponRepo;
pub use favorite_repo::FavoriteRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use settings_repo::SettingsRepo;
pub use setup_repo::SetupRepo;
pub use slider_repo::SliderRepo;
pub use store_repo::StoreRepo;
pub use usage_repo::UsageRepo;
pub use user_repo::UserRepo;
