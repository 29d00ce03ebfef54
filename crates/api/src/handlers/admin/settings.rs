//! Site settings. The singleton can be read and patched, never created or
//! deleted through the API.

use axum::extract::State;
use axum::Json;
use kobonat_db::models::settings::{AppSettings, UpdateSettings};
use kobonat_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/settings
pub async fn get_settings(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AppSettings>>> {
    let settings = SettingsRepo::get_or_create(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/settings
pub async fn update_settings(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<UpdateSettings>,
) -> AppResult<Json<DataResponse<AppSettings>>> {
    input.validate()?;

    let settings = SettingsRepo::update(&state.pool, &input).await?;
    tracing::info!(
        user_id = user.user_id,
        maintenance_mode = settings.maintenance_mode,
        "Settings updated"
    );
    Ok(Json(DataResponse { data: settings }))
}
