//! Static pages backed by settings content, and the contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kobonat_core::accounts::ContactForm;
use kobonat_core::error::CoreError;
use kobonat_core::i18n::{Lang, Localizable, Message};
use kobonat_core::types::DbId;
use kobonat_db::models::contact::CreateContactMessage;
use kobonat_db::models::settings::SettingsField;
use kobonat_db::repositories::ContactRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::site::SiteContext;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::SiteView;

#[derive(Debug, Serialize)]
pub struct ContentPage {
    pub lang: Lang,
    pub site: SiteView,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ContactPage {
    pub lang: Lang,
    pub site: SiteView,
    pub contact_email: String,
    pub contact_phone: String,
    pub whatsapp_number: String,
}

#[derive(Debug, Serialize)]
pub struct ContactReceived {
    pub id: DbId,
    pub message: &'static str,
}

fn content_page(site: SiteContext, field: SettingsField) -> Json<ContentPage> {
    Json(ContentPage {
        lang: site.lang,
        content: site.settings.localized_string(field, site.lang),
        site: SiteView::new(&site.settings, site.lang),
    })
}

/// GET /about/
pub async fn about(site: SiteContext) -> Json<ContentPage> {
    content_page(site, SettingsField::About)
}

/// GET /privacy/
pub async fn privacy(site: SiteContext) -> Json<ContentPage> {
    content_page(site, SettingsField::Privacy)
}

/// GET /terms/
pub async fn terms(site: SiteContext) -> Json<ContentPage> {
    content_page(site, SettingsField::Terms)
}

/// GET /contact/
pub async fn contact_page(site: SiteContext) -> Json<ContactPage> {
    let settings = &site.settings;
    Json(ContactPage {
        lang: site.lang,
        site: SiteView::new(settings, site.lang),
        contact_email: settings.contact_email.clone(),
        contact_phone: settings.contact_phone.clone(),
        whatsapp_number: settings.whatsapp_number.clone(),
    })
}

/// POST /contact/
///
/// Store a visitor message for the back-office inbox.
pub async fn submit_contact(
    State(state): State<AppState>,
    site: SiteContext,
    Json(form): Json<ContactForm>,
) -> AppResult<impl IntoResponse> {
    let form = form.normalized();
    form.validate().map_err(CoreError::from)?;

    let input = CreateContactMessage {
        name: form.name,
        email: form.email,
        phone: form.phone,
        subject: form.subject,
        message: form.message,
    };
    let saved = ContactRepo::create(&state.pool, &input).await?;
    tracing::info!(id = saved.id, subject = %saved.subject, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ContactReceived {
                id: saved.id,
                message: Message::ContactMessageSent.text(site.lang),
            },
        }),
    ))
}
