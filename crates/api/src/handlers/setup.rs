//! First-run setup wizard.
//!
//! Reachable only while no administrator exists; afterwards both methods
//! redirect to the home page.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use kobonat_core::setup::{SetupForm, POST_SETUP_REDIRECT};
use kobonat_core::settings::{DEFAULT_APP_NAME, DEFAULT_APP_NAME_EN};
use kobonat_core::types::DbId;
use kobonat_db::repositories::setup_repo::CompleteSetup;
use kobonat_db::repositories::SetupRepo;
use serde::Serialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::site::SiteContext;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SetupDefaults {
    pub app_name: &'static str,
    pub app_name_en: &'static str,
}

/// Submitted values echoed back on a failed attempt. Passwords are omitted.
#[derive(Debug, Serialize)]
pub struct SetupInput {
    pub username: String,
    pub email: String,
    pub app_name: String,
    pub app_name_en: String,
}

#[derive(Debug, Serialize)]
pub struct SetupErrors {
    pub errors: Vec<&'static str>,
    pub input: SetupInput,
}

#[derive(Debug, Serialize)]
pub struct SetupComplete {
    pub user_id: DbId,
    pub username: String,
    pub redirect_url: &'static str,
}

/// GET /setup/
///
/// Form defaults for the wizard.
pub async fn setup_form(State(state): State<AppState>) -> AppResult<Response> {
    if SetupRepo::is_initialized(&state.pool).await? {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Json(DataResponse {
        data: SetupDefaults {
            app_name: DEFAULT_APP_NAME,
            app_name_en: DEFAULT_APP_NAME_EN,
        },
    })
    .into_response())
}

/// POST /setup/
///
/// Create the first administrator and write the initial site settings.
pub async fn complete_setup(
    State(state): State<AppState>,
    site: SiteContext,
    Json(form): Json<SetupForm>,
) -> AppResult<Response> {
    if SetupRepo::is_initialized(&state.pool).await? {
        return Ok(Redirect::to("/").into_response());
    }

    let form = form.normalized();
    let errors = form.validate();
    if !errors.is_empty() {
        let body = SetupErrors {
            errors: errors.iter().map(|e| e.text(site.lang)).collect(),
            input: SetupInput {
                username: form.username.clone(),
                email: form.email.clone(),
                app_name: form.app_name().to_string(),
                app_name_en: form.app_name_en().to_string(),
            },
        };
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    let password_hash = hash_password(&form.password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CompleteSetup {
        username: form.username.clone(),
        email: form.email.clone(),
        password_hash,
        app_name: form.app_name().to_string(),
        app_name_en: form.app_name_en().to_string(),
    };

    let Some(admin) = SetupRepo::complete(&state.pool, &input).await? else {
        tracing::info!(username = %input.username, "Setup already completed by another request");
        return Ok(Redirect::to("/").into_response());
    };

    tracing::info!(user_id = admin.id, username = %admin.username, "Initial setup completed");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SetupComplete {
                user_id: admin.id,
                username: admin.username,
                redirect_url: POST_SETUP_REDIRECT,
            },
        }),
    )
        .into_response())
}
