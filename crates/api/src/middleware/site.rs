//! Per-request site context: the settings row and the display language.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use kobonat_core::error::CoreError;
use kobonat_core::i18n::{Lang, LANG_COOKIE};
use kobonat_db::models::settings::AppSettings;
use kobonat_db::repositories::SettingsRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Settings plus the language this request is served in.
///
/// The language is the `lang` cookie when valid, else the site default,
/// and always Arabic while English is disabled.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub settings: AppSettings,
    pub lang: Lang,
}

impl FromRequestParts<AppState> for SiteContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let settings = SettingsRepo::get_or_create(&state.pool).await?;
        let preferred = cookie_value(&parts.headers, LANG_COOKIE).and_then(Lang::from_code);
        let lang = settings.effective_language(preferred);
        Ok(SiteContext { settings, lang })
    }
}

impl SiteContext {
    pub fn require_favorites(&self) -> Result<(), CoreError> {
        if !self.settings.enable_favorites {
            return Err(CoreError::FeatureDisabled("Favorites"));
        }
        Ok(())
    }

    pub fn require_notifications(&self) -> Result<(), CoreError> {
        if !self.settings.enable_notifications {
            return Err(CoreError::FeatureDisabled("Notifications"));
        }
        Ok(())
    }
}

/// Value of the cookie `name`, if the request carries one.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// `Set-Cookie` value persisting the language choice for a year.
pub fn lang_cookie(lang: Lang) -> String {
    format!(
        "{LANG_COOKIE}={}; Path=/; Max-Age=31536000; SameSite=Lax",
        lang.code()
    )
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; lang=en; x=1"));
        assert_eq!(cookie_value(&headers, "lang"), Some("en"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn multiple_cookie_headers_are_searched() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("lang=ar"));
        assert_eq!(cookie_value(&headers, "lang"), Some("ar"));
    }

    #[test]
    fn lang_cookie_is_site_wide() {
        let cookie = lang_cookie(Lang::En);
        assert!(cookie.starts_with("lang=en;"));
        assert!(cookie.contains("Path=/"));
    }
}
