//! Text-to-speech models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::execution::response::ByteStream;
use crate::query::impl_query_parameters;

/// Options for `POST /v1/speak`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeakSchema {
    pub model: Option<String>,
    pub encoding: Option<String>,
    pub container: Option<String>,
    pub sample_rate: Option<u32>,
    pub bit_rate: Option<u32>,
    pub callback: Option<String>,
    pub callback_method: Option<String>,
}

impl_query_parameters!(SpeakSchema {
    model => "model",
    encoding => "encoding",
    container => "container",
    sample_rate => "sample_rate",
    bit_rate => "bit_rate",
    callback => "callback",
    callback_method => "callback_method",
});

impl SpeakSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    pub fn callback(mut self, url: impl Into<String>) -> Self {
        self.callback = Some(url.into());
        self
    }
}

/// Request body for `POST /v1/speak`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSource {
    pub text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Header keys read from a speak response.
pub const SPEAK_HEADER_KEYS: [&str; 7] = [
    "content-type",
    "request-id",
    "model-uuid",
    "model-name",
    "char-count",
    "transfer-encoding",
    "date",
];

/// Metadata of a synthesized clip, recovered from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakMetadata {
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub model_uuid: Option<String>,
    pub model_name: Option<String>,
    pub characters: Option<u64>,
    pub transfer_encoding: Option<String>,
    pub date: Option<String>,
}

impl SpeakMetadata {
    /// Build from extracted headers. An unparsable `char-count` is dropped.
    pub fn from_headers(headers: &HashMap<String, String>) -> Self {
        let get = |key: &str| headers.get(key).cloned();
        Self {
            content_type: get("content-type").filter(|v| !v.is_empty()),
            request_id: get("request-id"),
            model_uuid: get("model-uuid"),
            model_name: get("model-name"),
            characters: headers.get("char-count").and_then(|v| v.trim().parse().ok()),
            transfer_encoding: get("transfer-encoding"),
            date: get("date"),
        }
    }
}

/// Synthesized audio: header metadata plus the unread body.
#[derive(Debug)]
pub struct SpeakStream {
    pub metadata: SpeakMetadata,
    pub audio: ByteStream,
}
