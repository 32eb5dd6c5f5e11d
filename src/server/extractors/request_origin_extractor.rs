use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

/// origin the caller reached us on, if the headers tell us
pub struct RequestOrigin(pub Option<String>);

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// `Origin` when the browser sent a real one, otherwise scheme + host rebuilt from the
/// (forwarded) host headers
pub fn origin_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(origin) = header_str(headers, header::ORIGIN.as_str()) {
        if origin != "null" {
            return Some(origin.trim_end_matches('/').to_string());
        }
    }

    let host = header_str(headers, "x-forwarded-host")
        .or_else(|| header_str(headers, header::HOST.as_str()))?;

    // proxies can stack these, the first entry is the client facing one
    let host = host.split(',').next().unwrap_or(host).trim();

    let scheme = header_str(headers, "x-forwarded-proto")
        .and_then(|proto| proto.split(',').next())
        .map(|proto| proto.trim())
        .unwrap_or("http");

    Some(format!("{}://{}", scheme, host))
}

impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestOrigin(origin_from_headers(&parts.headers)))
    }
}
