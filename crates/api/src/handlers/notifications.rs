//! User-facing notification inbox.
//!
//! Delivery rows are created lazily: listing the inbox first fans out every
//! sent broadcast the user has not received yet.

use axum::extract::{Path, State};
use axum::Json;
use kobonat_core::error::CoreError;
use kobonat_core::i18n::Lang;
use kobonat_core::types::DbId;
use kobonat_db::repositories::NotificationRepo;
use serde::Serialize;

use crate::error::{ActionResult, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::site::SiteContext;
use crate::response::{ActionResponse, NoFields};
use crate::state::AppState;
use crate::views::InboxView;

#[derive(Debug, Serialize)]
pub struct InboxPage {
    pub lang: Lang,
    pub notifications: Vec<InboxView>,
    pub unread_count: i64,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct ReadAllFields {
    pub marked_read: u64,
}

/// GET /notifications/
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    site: SiteContext,
) -> AppResult<Json<InboxPage>> {
    site.require_notifications()?;

    let delivered = NotificationRepo::fan_out(&state.pool, user.user_id).await?;
    if delivered > 0 {
        tracing::info!(user_id = user.user_id, delivered, "Notifications delivered");
    }

    let entries = NotificationRepo::inbox(&state.pool, user.user_id).await?;
    let unread_count = entries.iter().filter(|e| !e.is_read).count() as i64;

    Ok(Json(InboxPage {
        lang: site.lang,
        notifications: entries.iter().map(|e| InboxView::new(e, site.lang)).collect(),
        unread_count,
    }))
}

/// POST /mark-notification-read/{id}/
///
/// `id` is the per-user delivery row and must belong to the caller.
pub async fn mark_read(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    site: SiteContext,
    Path(user_notification_id): Path<DbId>,
) -> ActionResult<Json<ActionResponse<NoFields>>> {
    let user = viewer.require()?;
    site.require_notifications()?;

    let found = NotificationRepo::mark_read(&state.pool, user.user_id, user_notification_id).await?;
    if !found {
        return Err(CoreError::not_found("Notification", user_notification_id).into());
    }

    Ok(Json(ActionResponse::ok(NoFields {})))
}

/// POST /notifications/read-all/
pub async fn mark_all_read(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    site: SiteContext,
) -> ActionResult<Json<ActionResponse<ReadAllFields>>> {
    let user = viewer.require()?;
    site.require_notifications()?;

    let marked_read = NotificationRepo::mark_all_read(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, marked_read, "Notifications marked read");

    Ok(Json(ActionResponse::ok(ReadAllFields { marked_read })))
}

/// GET /api/notifications/count/
///
/// Unread count for the header badge. Zero for anonymous visitors and
/// while notifications are disabled.
pub async fn unread_count(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    site: SiteContext,
) -> AppResult<Json<UnreadCount>> {
    let count = match viewer.user_id() {
        Some(user_id) if site.settings.enable_notifications => {
            NotificationRepo::unread_count(&state.pool, user_id).await?
        }
        _ => 0,
    };
    Ok(Json(UnreadCount { count }))
}
