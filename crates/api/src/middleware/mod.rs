//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- Authenticated user from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Same, but anonymous visitors are allowed.
//! - [`rbac::RequireStaff`] -- Requires `staff` or `admin`.
//! - [`setup_gate::setup_gate`] -- Redirects to the wizard until an admin exists.
//! - [`site::SiteContext`] -- Settings row plus the visitor's language.
//! - [`client::ClientMeta`] -- Client IP, user agent and device type.

pub mod auth;
pub mod client;
pub mod rbac;
pub mod setup_gate;
pub mod site;
