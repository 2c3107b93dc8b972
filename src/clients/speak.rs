//! Text-to-speech (`/v1/speak`).

use std::sync::Arc;

use crate::callback::{ensure_no_callback, resolve_callback};
use crate::defaults::paths;
use crate::error::DeepgramError;
use crate::execution::{RequestBody, RestClient};
use crate::models::listen::AsyncResponse;
use crate::models::speak::{SPEAK_HEADER_KEYS, SpeakMetadata, SpeakSchema, SpeakStream, TextSource};
use crate::query::QueryParameters;
use crate::types::CallOptions;

#[derive(Debug, Clone)]
pub struct SpeakClient {
    rest: Arc<RestClient>,
}

impl SpeakClient {
    pub(crate) fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Synthesize `text`. The audio is returned unread together with the
    /// metadata the service reports in its response headers.
    pub async fn stream(
        &self,
        text: &str,
        options: &SpeakSchema,
        call: &CallOptions,
    ) -> Result<SpeakStream, DeepgramError> {
        ensure_no_callback(options.callback.as_deref())?;
        let body = RequestBody::json(&TextSource::new(text))?;
        let response = self
            .rest
            .post_binary(paths::SPEAK, &options.to_query(), body, &SPEAK_HEADER_KEYS, call)
            .await?;
        let metadata = SpeakMetadata::from_headers(&response.headers);
        tracing::debug!(target: "deepgram::speak", request_id = ?metadata.request_id, chars = ?metadata.characters, "speech stream opened");
        Ok(SpeakStream {
            metadata,
            audio: response.body,
        })
    }

    /// Synthesize `text` and have the audio delivered to a callback URL.
    pub async fn stream_callback(
        &self,
        text: &str,
        callback: Option<&str>,
        options: &SpeakSchema,
        call: &CallOptions,
    ) -> Result<AsyncResponse, DeepgramError> {
        let callback = resolve_callback(options.callback.as_deref(), callback)?;
        let options = SpeakSchema {
            callback: Some(callback),
            ..options.clone()
        };
        let body = RequestBody::json(&TextSource::new(text))?;
        self.rest
            .post(paths::SPEAK, &options.to_query(), body, call)
            .await
    }
}
