//! Client metadata recorded with coupon usage and sessions.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use kobonat_core::usage::{client_ip, DeviceType};

use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct ClientMeta {
    /// First `X-Forwarded-For` hop, else the peer address.
    pub ip: Option<String>,
    pub user_agent: String,
    pub device_type: DeviceType,
}

impl FromRequestParts<AppState> for ClientMeta {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let forwarded_for = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok());
        // Absent when the server is not started with connect info (tests).
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(ClientMeta {
            ip: client_ip(forwarded_for, peer),
            device_type: DeviceType::detect(&user_agent),
            user_agent,
        })
    }
}
