//! REST dispatcher
//!
//! `RestClient` owns the pooled HTTP client and issues every verb through a
//! single `execute` path. The verb methods differ only in the HTTP method,
//! the body they attach and the [`ResponseDecoding`] they request.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use super::body::RequestBody;
use super::cancel::with_cancellation;
use super::headers::extract_headers;
use super::interceptor::{HttpInterceptor, HttpRequestContext, generate_request_id};
use super::response::{BinaryResponse, ByteStream, DispatchOutcome, ResponseDecoding};
use crate::error::DeepgramError;
use crate::query::{QueryString, append_query};
use crate::types::CallOptions;

/// Shared request plumbing for all endpoint clients.
pub struct RestClient {
    http_client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    timeout: RwLock<Option<Duration>>,
}

impl RestClient {
    /// Trailing slashes on `base_url` are dropped; paths are appended to it verbatim.
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers,
            interceptors: Vec::new(),
            timeout: RwLock::new(None),
        }
    }

    pub fn with_interceptors(mut self, interceptors: Vec<Arc<dyn HttpInterceptor>>) -> Self {
        self.interceptors = interceptors;
        self
    }

    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        self.set_timeout(timeout);
        self
    }

    /// Change the per-call timeout. Calls already dispatched keep the value
    /// they sampled.
    pub fn set_timeout(&self, timeout: Option<Duration>) {
        let mut guard = self.timeout.write().unwrap_or_else(|p| p.into_inner());
        *guard = timeout;
    }

    pub fn timeout(&self) -> Option<Duration> {
        *self.timeout.read().unwrap_or_else(|p| p.into_inner())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryString,
        call: &CallOptions,
    ) -> Result<T, DeepgramError> {
        self.execute(Method::GET, path, query, RequestBody::Empty, ResponseDecoding::Json, call)
            .await?
            .into_json()
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryString,
        body: RequestBody,
        call: &CallOptions,
    ) -> Result<T, DeepgramError> {
        self.execute(Method::POST, path, query, body, ResponseDecoding::Json, call)
            .await?
            .into_json()
    }

    /// POST whose success body is binary. Metadata comes back through the
    /// allow-listed `keys`; the body is left unread for the caller.
    pub async fn post_binary<S: AsRef<str>>(
        &self,
        path: &str,
        query: &QueryString,
        body: RequestBody,
        keys: &[S],
        call: &CallOptions,
    ) -> Result<BinaryResponse, DeepgramError> {
        let keys = keys.iter().map(|k| k.as_ref().to_string()).collect();
        self.execute(
            Method::POST,
            path,
            query,
            body,
            ResponseDecoding::BinaryWithHeaders(keys),
            call,
        )
        .await?
        .into_binary()
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryString,
        body: RequestBody,
        call: &CallOptions,
    ) -> Result<T, DeepgramError> {
        self.execute(Method::PUT, path, query, body, ResponseDecoding::Json, call)
            .await?
            .into_json()
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryString,
        body: RequestBody,
        call: &CallOptions,
    ) -> Result<T, DeepgramError> {
        self.execute(Method::PATCH, path, query, body, ResponseDecoding::Json, call)
            .await?
            .into_json()
    }

    /// DELETE that ignores the response body.
    pub async fn delete(
        &self,
        path: &str,
        query: &QueryString,
        call: &CallOptions,
    ) -> Result<(), DeepgramError> {
        self.execute(Method::DELETE, path, query, RequestBody::Empty, ResponseDecoding::Empty, call)
            .await
            .map(|_| ())
    }

    /// DELETE that decodes the response body.
    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryString,
        call: &CallOptions,
    ) -> Result<T, DeepgramError> {
        self.execute(Method::DELETE, path, query, RequestBody::Empty, ResponseDecoding::Json, call)
            .await?
            .into_json()
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &QueryString,
        body: RequestBody,
        decoding: ResponseDecoding,
        call: &CallOptions,
    ) -> Result<DispatchOutcome, DeepgramError> {
        let mut query = query.clone();
        if let Some(addons) = &call.addons {
            query.extend_addons(addons);
        }
        let ctx = HttpRequestContext {
            request_id: generate_request_id(),
            method,
            url: append_query(&self.url_for(path), &query),
        };

        let result = with_cancellation(
            call.cancellation.as_ref(),
            self.send(&ctx, body, decoding, call),
        )
        .await;

        match &result {
            Ok(_) => {
                tracing::debug!(target: "deepgram::http", request_id=%ctx.request_id, method=%ctx.method, url=%ctx.url, "request succeeded");
            }
            Err(error) => {
                for interceptor in &self.interceptors {
                    interceptor.on_error(&ctx, error);
                }
                tracing::warn!(target: "deepgram::http", request_id=%ctx.request_id, method=%ctx.method, url=%ctx.url, status=?error.status_code(), err=%error, "request failed");
            }
        }
        result
    }

    async fn send(
        &self,
        ctx: &HttpRequestContext,
        body: RequestBody,
        decoding: ResponseDecoding,
        call: &CallOptions,
    ) -> Result<DispatchOutcome, DeepgramError> {
        let mut builder = self
            .http_client
            .request(ctx.method.clone(), &ctx.url)
            .headers(self.headers.clone());
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        builder = body.apply(builder);
        for interceptor in &self.interceptors {
            builder = interceptor.on_before_send(ctx, builder)?;
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let text = response.text().await.unwrap_or_default();
            return Err(DeepgramError::http_status(status.as_u16(), text));
        }
        for interceptor in &self.interceptors {
            interceptor.on_response(ctx, &response)?;
        }

        match decoding {
            ResponseDecoding::Json => Ok(DispatchOutcome::Json(response.bytes().await?)),
            ResponseDecoding::BinaryWithHeaders(keys) => {
                let headers = extract_headers(response.headers(), keys.as_slice());
                Ok(DispatchOutcome::Binary(BinaryResponse {
                    headers,
                    body: ByteStream::from_response(response, call.cancellation.clone()),
                }))
            }
            ResponseDecoding::Empty => Ok(DispatchOutcome::Empty),
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout())
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::cancel::CancellationToken;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingInterceptor {
        urls: Mutex<Vec<String>>,
        errors: Mutex<Vec<DeepgramError>>,
    }

    impl HttpInterceptor for RecordingInterceptor {
        fn on_before_send(
            &self,
            ctx: &HttpRequestContext,
            builder: reqwest::RequestBuilder,
        ) -> Result<reqwest::RequestBuilder, DeepgramError> {
            self.urls.lock().unwrap().push(ctx.url.clone());
            Ok(builder)
        }

        fn on_error(&self, _ctx: &HttpRequestContext, error: &DeepgramError) {
            self.errors.lock().unwrap().push(error.clone());
        }
    }

    fn client(base_url: &str) -> RestClient {
        RestClient::new(reqwest::Client::new(), base_url, HeaderMap::new())
    }

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Project {
        project_id: String,
    }

    #[tokio::test]
    async fn error_status_becomes_transport_error_with_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/projects")
            .with_status(500)
            .with_body(r#"{"error":"bad"}"#)
            .create_async()
            .await;

        let err = client(&server.url())
            .get::<Project>("/v1/projects", &QueryString::new(), &CallOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.body(), Some(r#"{"error":"bad"}"#));
        assert!(matches!(err, DeepgramError::Transport { .. }));
    }

    #[tokio::test]
    async fn unexpected_success_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/projects/p1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"no id"}"#)
            .create_async()
            .await;

        let err = client(&server.url())
            .get::<Project>("/v1/projects/p1", &QueryString::new(), &CallOptions::new())
            .await
            .unwrap_err();

        match err {
            DeepgramError::Decode { body, .. } => assert_eq!(body, r#"{"name":"no id"}"#),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_query_leaves_url_bare_and_addons_follow_options() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/projects")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"project_id":"p1"}"#)
            .expect(2)
            .create_async()
            .await;

        let recorder = Arc::new(RecordingInterceptor::default());
        let rest = client(&server.url()).with_interceptors(vec![recorder.clone() as Arc<dyn HttpInterceptor>]);

        let project: Project = rest
            .get("/v1/projects", &QueryString::new(), &CallOptions::new())
            .await
            .unwrap();
        assert_eq!(project.project_id, "p1");

        let mut query = QueryString::new();
        query.push_pair("model", "nova-2");
        let call = CallOptions::new().with_addon("beta", "1");
        let _: Project = rest.get("/v1/projects", &query, &call).await.unwrap();

        let urls = recorder.urls.lock().unwrap().clone();
        assert_eq!(urls[0], format!("{}/v1/projects", server.url()));
        assert_eq!(urls[1], format!("{}/v1/projects?model=nova-2&beta=1", server.url()));
    }

    #[tokio::test]
    async fn cancelled_token_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("DELETE", "/v1/projects/p1")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let token = CancellationToken::new();
        token.cancel();
        let recorder = Arc::new(RecordingInterceptor::default());
        let rest = client(&server.url()).with_interceptors(vec![recorder.clone() as Arc<dyn HttpInterceptor>]);

        let err = rest
            .delete("/v1/projects/p1", &QueryString::new(), &CallOptions::new().with_cancellation(token))
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(recorder.errors.lock().unwrap().as_slice(), &[DeepgramError::Cancelled]);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn binary_post_returns_headers_and_unread_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/speak")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_header("dg-request-id", "req-1")
            .with_header("x-dg-char-count", "11")
            .with_body(b"ID3audio".to_vec())
            .create_async()
            .await;

        let body = RequestBody::json(&serde_json::json!({"text": "hello world"})).unwrap();
        let binary = client(&server.url())
            .post_binary(
                "/v1/speak",
                &QueryString::new(),
                body,
                &["content-type", "request-id", "char-count"],
                &CallOptions::new(),
            )
            .await
            .unwrap();

        assert_eq!(binary.header("request-id"), Some("req-1"));
        assert_eq!(binary.header("char-count"), Some("11"));
        assert_eq!(binary.header("content-type"), Some("audio/mpeg"));
        assert_eq!(binary.body.collect().await.unwrap().as_ref(), b"ID3audio");
    }

    #[tokio::test]
    async fn only_4xx_and_5xx_are_transport_errors() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("DELETE", "/v1/projects/p1")
            .with_status(304)
            .create_async()
            .await;
        let _gone = server
            .mock("DELETE", "/v1/projects/p2")
            .with_status(404)
            .with_body("missing")
            .create_async()
            .await;

        let rest = client(&server.url());
        rest.delete("/v1/projects/p1", &QueryString::new(), &CallOptions::new())
            .await
            .unwrap();

        let err = rest
            .delete("/v1/projects/p2", &QueryString::new(), &CallOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.body(), Some("missing"));
    }

    #[test]
    fn timeout_is_replaced_not_merged() {
        let rest = client("https://api.example.com/").with_timeout(Some(Duration::from_secs(5)));
        assert_eq!(rest.base_url(), "https://api.example.com");
        assert_eq!(rest.timeout(), Some(Duration::from_secs(5)));
        rest.set_timeout(None);
        assert_eq!(rest.timeout(), None);
    }
}
