//! Pre-recorded transcription (`/v1/listen`).

use std::sync::Arc;

use crate::callback::{ensure_no_callback, resolve_callback};
use crate::defaults::paths;
use crate::error::DeepgramError;
use crate::execution::{RequestBody, RestClient};
use crate::models::listen::{AsyncResponse, PrerecordedSchema, SyncResponse};
use crate::query::QueryParameters;
use crate::types::{CallOptions, Source};

/// Client for pre-recorded transcription.
#[derive(Debug, Clone)]
pub struct ListenClient {
    rest: Arc<RestClient>,
}

impl ListenClient {
    pub(crate) fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Transcribe audio and wait for the result.
    ///
    /// Fails with a validation error if `options.callback` is set.
    pub async fn transcribe(
        &self,
        source: Source,
        options: &PrerecordedSchema,
        call: &CallOptions,
    ) -> Result<SyncResponse, DeepgramError> {
        ensure_no_callback(options.callback.as_deref())?;
        tracing::debug!(target: "deepgram::listen", source = ?source, "transcribe");
        self.rest
            .post(paths::LISTEN, &options.to_query(), RequestBody::from(source), call)
            .await
    }

    /// Transcribe audio hosted at `url`.
    pub async fn transcribe_url(
        &self,
        url: &str,
        options: &PrerecordedSchema,
        call: &CallOptions,
    ) -> Result<SyncResponse, DeepgramError> {
        self.transcribe(Source::url(url), options, call).await
    }

    /// Submit audio for transcription delivered to a callback URL.
    ///
    /// The callback comes from `options.callback` or from `callback`; exactly
    /// one of them must be set.
    pub async fn transcribe_callback(
        &self,
        source: Source,
        callback: Option<&str>,
        options: &PrerecordedSchema,
        call: &CallOptions,
    ) -> Result<AsyncResponse, DeepgramError> {
        let callback = resolve_callback(options.callback.as_deref(), callback)?;
        let options = PrerecordedSchema {
            callback: Some(callback),
            ..options.clone()
        };
        tracing::debug!(target: "deepgram::listen", source = ?source, "transcribe with callback");
        self.rest
            .post(paths::LISTEN, &options.to_query(), RequestBody::from(source), call)
            .await
    }

    pub async fn transcribe_url_callback(
        &self,
        url: &str,
        callback: Option<&str>,
        options: &PrerecordedSchema,
        call: &CallOptions,
    ) -> Result<AsyncResponse, DeepgramError> {
        self.transcribe_callback(Source::url(url), callback, options, call)
            .await
    }
}
