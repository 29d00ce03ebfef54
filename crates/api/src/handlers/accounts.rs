//! Visitor accounts: registration, login, token refresh, logout, profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use kobonat_core::accounts::{ProfileForm, RegistrationForm};
use kobonat_core::error::CoreError;
use kobonat_core::i18n::{Lang, Message};
use kobonat_core::roles::ROLE_MEMBER_ID;
use kobonat_core::types::DbId;
use kobonat_db::models::profile::{UpdateProfile, UserProfile};
use kobonat_db::models::session::CreateSession;
use kobonat_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use kobonat_db::repositories::{ProfileRepo, RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientMeta;
use crate::middleware::site::SiteContext;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login/`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /token/refresh/`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Tokens returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(flatten)]
    pub auth: AuthResponse,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: UserResponse,
    pub profile: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdated {
    #[serde(flatten)]
    pub profile: ProfileView,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register/
///
/// Create a member account with its profile and sign it in.
pub async fn register(
    State(state): State<AppState>,
    site: SiteContext,
    client: ClientMeta,
    Json(form): Json<RegistrationForm>,
) -> AppResult<impl IntoResponse> {
    let lang = site.lang;
    if !site.settings.enable_registration {
        return Err(CoreError::Forbidden(Message::RegistrationClosed.text(lang).into()).into());
    }

    form.check(lang)?;
    let username = form.username.trim();
    let email = form.email.trim();
    if UserRepo::username_exists(&state.pool, username).await? {
        return Err(localized_validation(Message::UsernameTaken, lang));
    }
    if UserRepo::email_exists(&state.pool, email).await? {
        return Err(localized_validation(Message::EmailTaken, lang));
    }

    let password_hash = hash_password(&form.password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        role_id: ROLE_MEMBER_ID,
    };
    let user = UserRepo::create_with_profile(&state.pool, &input, Some(lang.code())).await?;
    tracing::info!(user_id = user.id, username = %user.username, "Account registered");

    let auth = create_auth_response(&state, &user, &client).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            auth,
            message: Message::AccountCreated.text(lang),
        }),
    ))
}

/// POST /login/
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    site: SiteContext,
    client: ClientMeta,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            Message::InvalidCredentials.text(site.lang).into(),
        ))
    };

    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    ensure_can_sign_in(&state, &user, site.lang).await?;
    UserRepo::record_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(create_auth_response(&state, &user, &client).await?))
}

/// POST /token/refresh/
///
/// Exchange a valid refresh token for new tokens. The old session is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    site: SiteContext,
    client: ClientMeta,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;
    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    ensure_can_sign_in(&state, &user, site.lang).await?;

    Ok(Json(create_auth_response(&state, &user, &client).await?))
}

/// POST /logout/
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /profile/
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    let view = load_profile(&state, user.user_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// PUT /profile/
///
/// Update name, email, phone, preferred language and notification opt-in.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    site: SiteContext,
    Json(form): Json<ProfileForm>,
) -> AppResult<Json<DataResponse<ProfileUpdated>>> {
    let language = form.check()?;

    let user_patch = UpdateUser {
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
    };
    UserRepo::update(&state.pool, user.user_id, &user_patch)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user.user_id))?;

    let profile_patch = UpdateProfile {
        phone: form.phone,
        preferred_language: language.map(|l| l.code().to_string()),
        receive_notifications: form.receive_notifications,
    };
    ProfileRepo::update(&state.pool, user.user_id, &profile_patch)
        .await?
        .ok_or_else(|| CoreError::not_found("Profile", user.user_id))?;

    tracing::info!(user_id = user.user_id, "Profile updated");

    let profile = load_profile(&state, user.user_id).await?;
    Ok(Json(DataResponse {
        data: ProfileUpdated {
            profile,
            message: Message::ProfileUpdated.text(site.lang),
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn localized_validation(message: Message, lang: Lang) -> AppError {
    AppError::Core(CoreError::Validation(message.text(lang).into()))
}

/// Reject deactivated and banned accounts.
async fn ensure_can_sign_in(state: &AppState, user: &User, lang: Lang) -> AppResult<()> {
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let banned = ProfileRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .is_some_and(|p| p.is_banned);
    if banned {
        return Err(AppError::Core(CoreError::Forbidden(
            Message::AccountBanned.text(lang).into(),
        )));
    }
    Ok(())
}

async fn role_name(state: &AppState, role_id: DbId) -> AppResult<String> {
    let role = RoleRepo::find_by_id(&state.pool, role_id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Role {role_id} does not exist")))?;
    Ok(role.name)
}

async fn load_profile(state: &AppState, user_id: DbId) -> AppResult<ProfileView> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user_id))?;
    let profile = ProfileRepo::find_by_user_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Profile", user_id))?;
    let role = role_name(state, user.role_id).await?;

    Ok(ProfileView {
        user: UserResponse::from_user(&user, &role),
        profile,
    })
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    client: &ClientMeta,
) -> AppResult<AuthResponse> {
    let role = role_name(state, user.role_id).await?;
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(user.id, &role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let session = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
        user_agent: Some(client.user_agent.clone()).filter(|ua| !ua.is_empty()),
        ip_address: client.ip.clone(),
    };
    SessionRepo::create(&state.pool, &session).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role,
        },
    })
}
