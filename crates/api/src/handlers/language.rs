//! Language switch.

use axum::extract::Path;
use axum::http::header::{REFERER, SET_COOKIE};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use kobonat_core::i18n::Lang;

use crate::middleware::site::lang_cookie;

/// GET /set-language/{lang}
///
/// Remember the choice in the `lang` cookie and go back to the referring
/// page (or `/`). Unknown codes only redirect.
pub async fn set_language(Path(code): Path<String>, headers: HeaderMap) -> Response {
    let target = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("/");
    let redirect = Redirect::to(target);

    match Lang::from_code(&code) {
        Some(lang) => {
            tracing::debug!(lang = lang.code(), "Language switched");
            ([(SET_COOKIE, lang_cookie(lang))], redirect).into_response()
        }
        None => redirect.into_response(),
    }
}
