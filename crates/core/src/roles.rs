//! Well-known role name constants.
//!
//! Role IDs match the seed order of the `roles` lookup table.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_MEMBER: &str = "member";

pub const ROLE_ADMIN_ID: i64 = 1;
pub const ROLE_STAFF_ID: i64 = 2;
pub const ROLE_MEMBER_ID: i64 = 3;

/// Whether a role may use the back office and bypass maintenance mode.
pub fn is_staff_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}
