// src/utils/http.rs

//! HTTP client utilities.
//!
//! The portal rejects requests that do not look like they come from its own
//! web client, so every request carries a fixed header set derived from the
//! configured index URL.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{
    ACCEPT, CONNECTION, CONTENT_TYPE, HOST, HeaderMap, HeaderValue, ORIGIN, REFERER,
};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::PortalConfig;

/// Build the fixed header set sent on every portal request.
///
/// Host, Origin and Referer are derived from `portal.index`; the
/// Content-Type stays `application/x-www-form-urlencoded` on all calls,
/// including the JSON-bodied order POST, because that is what the portal
/// expects on the wire.
pub fn portal_headers(portal: &PortalConfig) -> Result<HeaderMap> {
    let index = Url::parse(&portal.index)?;
    let host = index
        .host_str()
        .ok_or_else(|| AppError::config(format!("portal.index has no host: {}", portal.index)))?;
    let host = match index.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    let origin = format!("{}://{}", index.scheme(), host);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(HOST, header_value(&host)?);
    headers.insert(ORIGIN, header_value(&origin)?);
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    headers.insert(REFERER, header_value(&portal.index)?);
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::config(format!("invalid header value '{value}': {e}")))
}

/// Create a configured HTTP client.
pub fn create_client(portal: &PortalConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(portal.timeout_secs))
        .build()?;
    Ok(client)
}

/// Create an HTTP client that does not follow redirects.
///
/// The login endpoint answers with a 302 whose Set-Cookie headers carry the
/// session; following the redirect would lose them.
pub fn create_login_client(portal: &PortalConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(portal.timeout_secs))
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(client)
}

/// Assemble a `Cookie` header value from a name→value map.
pub fn cookie_header(cookies: &HashMap<String, String>) -> String {
    let mut parts: Vec<String> = cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    parts.sort();
    parts.join("; ")
}
