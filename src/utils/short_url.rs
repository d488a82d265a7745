//! Short URL construction from the configured domain or the request's `Host`.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Normalizes an externally configured public domain into a base URL.
///
/// Values without a scheme get `https://` prepended; explicit `http://` or
/// `https://` prefixes are kept. Trailing slashes are removed.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_base_domain("s.example.com"), "https://s.example.com");
/// assert_eq!(normalize_base_domain("http://localhost:8080/"), "http://localhost:8080");
/// ```
pub fn normalize_base_domain(domain: &str) -> String {
    let domain = domain.trim().trim_end_matches('/');

    if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("https://{}", domain)
    }
}

/// Extracts the raw `Host` header value, port included.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the header is missing, empty or not
/// valid UTF-8.
pub fn host_from_headers(headers: &HeaderMap) -> Result<&str, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request("Missing Host header", json!({})));
    }

    Ok(host)
}

/// Picks the base URL for short links.
///
/// A configured domain (already normalized) overrides the request; otherwise
/// the request's own host is used with an `http://` scheme.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when nothing is configured and the request
/// carries no usable `Host` header.
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    match configured {
        Some(base) => Ok(base.to_string()),
        None => Ok(format!("http://{}", host_from_headers(headers)?)),
    }
}

/// Joins a base URL and a code into the caller-visible short URL.
pub fn build_short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
