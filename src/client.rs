// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client identity taken from proxy headers.
//!
//! The address is whatever the nearest proxy reports. A client talking to
//! the service directly can set these headers itself, so the key is only
//! good enough for abuse deterrence.

use axum::http::{header, HeaderMap};

pub const FORWARDED_FOR: &str = "x-forwarded-for";
pub const REAL_IP: &str = "x-real-ip";

/// Key used when no proxy header identifies the client.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Resolve the rate limiting key for a request.
///
/// Prefers the first entry of `X-Forwarded-For`, then `X-Real-IP`.
pub fn resolve_client_key(headers: &HeaderMap) -> String {
    let forwarded = header_str(headers, FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded
        .or_else(|| header_str(headers, REAL_IP).map(str::trim).filter(|v| !v.is_empty()))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

/// The request's own `User-Agent`, used when the form did not report one.
pub fn header_user_agent(headers: &HeaderMap) -> Option<String> {
    header_str(headers, header::USER_AGENT.as_str())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// User agent recorded with an inquiry: the form's own report if it sent
/// one, else the request header, else empty.
pub fn resolve_user_agent(payload_ua: Option<&str>, header_ua: Option<&str>) -> String {
    [payload_ua, header_ua]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
