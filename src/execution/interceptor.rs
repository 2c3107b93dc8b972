//! HTTP Interceptor interfaces
//!
//! Interceptors can tweak request builders before send, observe successful
//! responses, and be notified of failures. Hooks are best-effort and should
//! stay cheap.

use crate::error::DeepgramError;
use reqwest::Method;

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    pub request_id: String,
    pub method: Method,
    pub url: String,
}

/// Client-side correlation id for one call.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before sending a request. Return the (possibly modified)
    /// builder or an error to short-circuit the request.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, DeepgramError> {
        Ok(builder)
    }

    /// Called after a response is received (only for successful responses).
    fn on_response(
        &self,
        _ctx: &HttpRequestContext,
        _response: &reqwest::Response,
    ) -> Result<(), DeepgramError> {
        Ok(())
    }

    /// Called when a call fails, including cancellation.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &DeepgramError) {}
}

/// A simple logging interceptor backed by `tracing` (no sensitive data).
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, DeepgramError> {
        tracing::debug!(target: "deepgram::http", request_id=%ctx.request_id, method=%ctx.method, url=%ctx.url, "sending request");
        Ok(builder)
    }

    fn on_response(
        &self,
        ctx: &HttpRequestContext,
        response: &reqwest::Response,
    ) -> Result<(), DeepgramError> {
        tracing::debug!(target: "deepgram::http", request_id=%ctx.request_id, method=%ctx.method, url=%ctx.url, status=%response.status().as_u16(), "response received");
        Ok(())
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &DeepgramError) {
        tracing::debug!(target: "deepgram::http", request_id=%ctx.request_id, method=%ctx.method, url=%ctx.url, err=%error, "request error");
    }
}
