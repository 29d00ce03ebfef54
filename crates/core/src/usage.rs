//! Coupon usage events and the request metadata recorded with them.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a visitor did with a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageAction {
    View,
    Copy,
    Click,
}

impl UsageAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Copy => "copy",
            Self::Click => "click",
        }
    }

    /// Parse an action string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "view" => Ok(Self::View),
            "copy" => Ok(Self::Copy),
            "click" => Ok(Self::Click),
            _ => Err(CoreError::Validation(format!(
                "Invalid usage action '{s}'. Must be one of: view, copy, click"
            ))),
        }
    }
}

/// Coarse device class derived from the User-Agent header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceType {
    /// Classify a User-Agent string. Phone markers are checked before
    /// tablet markers, so Android tablets report as mobile.
    pub fn detect(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if ua.contains("mobile") || ua.contains("android") {
            Self::Mobile
        } else if ua.contains("tablet") || ua.contains("ipad") {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

/// Determine the client IP: first `X-Forwarded-For` hop, else the peer.
///
/// Values that do not parse as an IP address are dropped.
pub fn client_ip(forwarded_for: Option<&str>, peer: Option<IpAddr>) -> Option<String> {
    match forwarded_for {
        Some(header) => header
            .split(',')
            .next()
            .map(str::trim)
            .and_then(|first| first.parse::<IpAddr>().ok())
            .map(|ip| ip.to_string()),
        None => peer.map(|ip| ip.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_strings_round_trip() {
        for action in [UsageAction::View, UsageAction::Copy, UsageAction::Click] {
            assert_eq!(UsageAction::from_str_db(action.as_str()).unwrap(), action);
        }
        assert!(UsageAction::from_str_db("delete").is_err());
    }

    #[test]
    fn detects_devices() {
        assert_eq!(
            DeviceType::detect("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0) Mobile/15E148"),
            DeviceType::Mobile
        );
        assert_eq!(
            DeviceType::detect("Mozilla/5.0 (Linux; Android 14; SM-X910)"),
            DeviceType::Mobile
        );
        assert_eq!(
            DeviceType::detect("Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)"),
            DeviceType::Tablet
        );
        assert_eq!(
            DeviceType::detect("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"),
            DeviceType::Desktop
        );
        assert_eq!(DeviceType::detect(""), DeviceType::Desktop);
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        let peer: IpAddr = "10.0.0.1".parse().unwrap();
        assert_eq!(
            client_ip(Some("203.0.113.7, 10.0.0.2"), Some(peer)).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn peer_used_without_forwarded_for() {
        let peer: IpAddr = "192.0.2.10".parse().unwrap();
        assert_eq!(client_ip(None, Some(peer)).as_deref(), Some("192.0.2.10"));
        assert_eq!(client_ip(None, None), None);
    }

    #[test]
    fn garbage_forwarded_for_is_dropped() {
        assert_eq!(client_ip(Some("unknown"), None), None);
    }
}
