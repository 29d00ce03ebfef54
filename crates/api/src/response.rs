//! Shared response envelope types for API handlers.
//!
//! JSON endpoints use a `{ "data": ... }` envelope. The AJAX actions used
//! by the public pages answer with a flat `{ "success": true, ... }` body
//! instead; see [`ActionResponse`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "success": true, ...fields }` body for AJAX actions.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub fields: T,
}

impl<T: Serialize> ActionResponse<T> {
    pub fn ok(fields: T) -> Self {
        Self {
            success: true,
            fields,
        }
    }
}

/// Empty field set for actions that only report success.
#[derive(Debug, Serialize)]
pub struct NoFields {}
