//! First-run gate: until an administrator exists, every request outside
//! the wizard is redirected to it.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use kobonat_core::setup::{SetupState, SETUP_PATH};
use kobonat_db::repositories::SetupRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Evaluated on every request; the result is never cached.
pub async fn setup_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let initialized = SetupRepo::is_initialized(&state.pool).await?;
    let setup = SetupState::from_initialized(initialized);

    if setup.must_redirect(request.uri().path()) {
        tracing::debug!(path = %request.uri().path(), "Site not set up, redirecting");
        return Ok(Redirect::to(SETUP_PATH).into_response());
    }

    Ok(next.run(request).await)
}
