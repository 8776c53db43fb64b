//! Scheme and host of the inbound request, for link composition.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::HOST;
use axum::http::request::Parts;

use weightshare_service::RequestOrigin;

/// The request's public origin, if one can be determined from its headers.
#[derive(Debug, Clone)]
pub struct InboundOrigin(pub Option<RequestOrigin>);

impl<S> FromRequestParts<S> for InboundOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(origin_from_headers(&parts.headers)))
    }
}

/// `X-Forwarded-Proto` (else `http`) with `X-Forwarded-Host` (else `Host`).
///
/// Schemes other than `http`/`https` and hosts that are not a bare
/// `host[:port]` authority are ignored.
pub fn origin_from_headers(headers: &HeaderMap) -> Option<RequestOrigin> {
    let host = first_value(headers, "x-forwarded-host")
        .filter(|h| is_valid_authority(h))
        .or_else(|| first_value(headers, HOST).filter(|h| is_valid_authority(h)))?;
    let scheme = first_value(headers, "x-forwarded-proto")
        .map(|s| s.to_ascii_lowercase())
        .filter(|s| s == "http" || s == "https")
        .unwrap_or_else(|| "http".to_string());
    Some(RequestOrigin::new(scheme, host))
}

/// Hostname, IPv4, or bracketed IPv6 literal, with an optional port.
fn is_valid_authority(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 255
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b':' | b'[' | b']'))
}

fn first_value<K: axum::http::header::AsHeaderName>(headers: &HeaderMap, key: K) -> Option<String> {
    headers
        .get(key)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
