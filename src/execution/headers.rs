//! HTTP Headers
//!
//! Request side: a small builder for the headers every call carries.
//!
//! Response side: the vendor header protocol. Binary endpoints (synthesized
//! audio) cannot put metadata in the body, so the service sends it in
//! headers named `dg-<key>` or, in the legacy form, `x-dg-<key>`.
//! [`extract_headers`] maps those back to their short keys.

use crate::error::DeepgramError;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use std::collections::HashMap;

/// Vendor prefix on custom response headers.
pub const VENDOR_PREFIX: &str = "dg-";

/// Legacy vendor prefix, checked first.
pub const LEGACY_VENDOR_PREFIX: &str = "x-dg-";

/// Short key under which the response media type is reported.
pub const CONTENT_TYPE_KEY: &str = "content-type";

/// Map allow-listed response headers to their short keys.
///
/// Per header, the first rule that matches wins: strip `x-dg-`, strip `dg-`,
/// then the bare lower-cased name. `content-type` is never taken from the
/// scan; when allow-listed it is synthesized from the response media type.
pub fn extract_headers<S: AsRef<str>>(headers: &HeaderMap, keys: &[S]) -> HashMap<String, String> {
    let allowed = |key: &str| keys.iter().any(|k| k.as_ref() == key);
    let mut result = HashMap::new();

    for name in headers.keys() {
        if *name == CONTENT_TYPE {
            continue;
        }
        // HeaderName is always lower-case
        let name = name.as_str();
        let Some(value) = headers.get(name) else {
            continue;
        };
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();

        if let Some(short) = name.strip_prefix(LEGACY_VENDOR_PREFIX)
            && allowed(short)
        {
            result.insert(short.to_string(), value);
            continue;
        }
        if let Some(short) = name.strip_prefix(VENDOR_PREFIX)
            && allowed(short)
        {
            result.insert(short.to_string(), value);
            continue;
        }
        if allowed(name) {
            result.insert(name.to_string(), value);
        }
    }

    if allowed(CONTENT_TYPE_KEY) {
        result.insert(CONTENT_TYPE_KEY.to_string(), media_type(headers));
    }

    result
}

/// Media type of the response without parameters, or empty when absent.
fn media_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// `Authorization: Token <key>`
    pub fn with_token_auth(mut self, api_key: &str) -> Result<Self, DeepgramError> {
        let mut value = HeaderValue::from_str(&format!("Token {api_key}"))
            .map_err(|e| DeepgramError::Configuration(format!("Invalid API key format: {e}")))?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    pub fn with_json_accept(mut self) -> Self {
        self.headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, DeepgramError> {
        self.headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| DeepgramError::Configuration(format!("Invalid user agent: {e}")))?,
        );
        Ok(self)
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, DeepgramError> {
        for (key, value) in custom_headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                DeepgramError::Configuration(format!("Invalid header name '{key}': {e}"))
            })?;
            self.headers.insert(
                header_name,
                HeaderValue::from_str(value).map_err(|e| {
                    DeepgramError::Configuration(format!("Invalid header value for '{key}': {e}"))
                })?,
            );
        }
        Ok(self)
    }

    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
