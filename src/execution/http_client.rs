//! HTTP client construction.

use crate::error::DeepgramError;
use crate::types::HttpConfig;

/// Build the pooled `reqwest::Client` shared by every endpoint client.
///
/// `config.timeout` is not installed here; `RestClient` applies it per request.
pub fn build_http_client_from_config(
    config: &HttpConfig,
) -> Result<reqwest::Client, DeepgramError> {
    let mut builder = reqwest::Client::builder();

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| DeepgramError::Configuration(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    if !config.headers.is_empty() {
        let mut headers = reqwest::header::HeaderMap::new();
        for (k, v) in &config.headers {
            let name = reqwest::header::HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
                DeepgramError::Configuration(format!("Invalid header name '{k}': {e}"))
            })?;
            let value = reqwest::header::HeaderValue::from_str(v).map_err(|e| {
                DeepgramError::Configuration(format!("Invalid header value for '{k}': {e}"))
            })?;
            headers.insert(name, value);
        }
        builder = builder.default_headers(headers);
    }

    builder
        .build()
        .map_err(|e| DeepgramError::Configuration(format!("Failed to create HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        assert!(build_http_client_from_config(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn rejects_invalid_proxy() {
        let config = HttpConfig {
            proxy: Some("not a url".to_string()),
            ..Default::default()
        };
        let err = build_http_client_from_config(&config).unwrap_err();
        assert!(matches!(err, DeepgramError::Configuration(_)));
    }

    #[test]
    fn rejects_invalid_header_name() {
        let mut config = HttpConfig::default();
        config
            .headers
            .insert("bad header".to_string(), "v".to_string());
        let err = build_http_client_from_config(&config).unwrap_err();
        assert!(matches!(err, DeepgramError::Configuration(m) if m.contains("bad header")));
    }
}
