//! Client entry point
//!
//! `DeepgramClient` bundles one shared [`RestClient`] and hands out the
//! endpoint clients. Cloning it is cheap and clones share the connection pool
//! and the per-call timeout.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::clients::{ListenClient, ManageClient, SpeakClient};
use crate::defaults;
use crate::error::DeepgramError;
use crate::execution::{
    HttpHeaderBuilder, HttpInterceptor, LoggingInterceptor, RestClient,
    build_http_client_from_config,
};
use crate::types::HttpConfig;

#[derive(Debug, Clone)]
pub struct DeepgramClient {
    rest: Arc<RestClient>,
}

impl DeepgramClient {
    pub fn builder() -> DeepgramClientBuilder {
        DeepgramClientBuilder::new()
    }

    /// Client for the production API with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self, DeepgramError> {
        Self::builder().api_key(api_key).build()
    }

    /// Like [`DeepgramClient::new`], with the key read from `DEEPGRAM_API_KEY`.
    pub fn from_env() -> Result<Self, DeepgramError> {
        Self::builder().build()
    }

    pub fn listen(&self) -> ListenClient {
        ListenClient::new(self.rest.clone())
    }

    pub fn speak(&self) -> SpeakClient {
        SpeakClient::new(self.rest.clone())
    }

    pub fn manage(&self) -> ManageClient {
        ManageClient::new(self.rest.clone())
    }

    /// Change the timeout applied to calls dispatched from now on.
    pub fn set_timeout(&self, timeout: Option<Duration>) {
        self.rest.set_timeout(timeout);
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.rest.timeout()
    }

    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }
}

/// Builder for [`DeepgramClient`].
pub struct DeepgramClientBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    http_config: HttpConfig,
    http_client: Option<reqwest::Client>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    http_debug: bool,
}

impl Default for DeepgramClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            http_config: HttpConfig::default(),
            http_client: None,
            interceptors: Vec::new(),
            http_debug: false,
        }
    }
}

impl DeepgramClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// API key; falls back to `DEEPGRAM_API_KEY` when not set.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Override the API host, e.g. for a self-hosted deployment.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = Some(timeout);
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.http_config.proxy = Some(proxy.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_config.user_agent = Some(user_agent.into());
        self
    }

    /// Header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_config.headers.insert(name.into(), value.into());
        self
    }

    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Use a caller-built `reqwest::Client`. Connect timeout and proxy
    /// settings are then the caller's responsibility.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_http_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Log every request and response at debug level (`deepgram::http`).
    pub fn http_debug(mut self, enabled: bool) -> Self {
        self.http_debug = enabled;
        self
    }

    pub fn build(self) -> Result<DeepgramClient, DeepgramError> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => std::env::var(defaults::API_KEY_ENV)
                .map(SecretString::from)
                .map_err(|_| {
                    DeepgramError::Configuration(format!(
                        "no API key given and {} is not set",
                        defaults::API_KEY_ENV
                    ))
                })?,
        };
        if api_key.expose_secret().trim().is_empty() {
            return Err(DeepgramError::Configuration(
                "API key must not be empty".to_string(),
            ));
        }

        let mut headers = HttpHeaderBuilder::new()
            .with_token_auth(api_key.expose_secret())?
            .with_json_accept()
            .with_custom_headers(&self.http_config.headers)?;
        if let Some(user_agent) = &self.http_config.user_agent {
            headers = headers.with_user_agent(user_agent)?;
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => build_http_client_from_config(&self.http_config)?,
        };

        let mut interceptors = self.interceptors;
        if self.http_debug {
            interceptors.push(Arc::new(LoggingInterceptor));
        }

        let base_url = self.base_url.unwrap_or_else(|| defaults::BASE_URL.to_string());
        let rest = RestClient::new(http_client, base_url, headers.build())
            .with_interceptors(interceptors)
            .with_timeout(self.http_config.timeout);

        tracing::debug!(target: "deepgram::http", base_url = rest.base_url(), timeout = ?rest.timeout(), "client built");
        Ok(DeepgramClient {
            rest: Arc::new(rest),
        })
    }
}
