//! Pre-recorded transcription models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::query::impl_query_parameters;

/// Options for `POST /v1/listen`.
///
/// Every field is optional; only fields that are set reach the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrerecordedSchema {
    pub alternatives: Option<u32>,
    /// Callback URL. Only valid with the `*_callback` operations.
    pub callback: Option<String>,
    /// HTTP method used for the callback (`post` or `put`).
    pub callback_method: Option<String>,
    pub custom_intent: Option<Vec<String>>,
    pub custom_intent_mode: Option<String>,
    pub custom_topic: Option<Vec<String>>,
    pub custom_topic_mode: Option<String>,
    pub detect_entities: Option<bool>,
    pub detect_language: Option<bool>,
    pub detect_topics: Option<bool>,
    pub diarize: Option<bool>,
    pub diarize_version: Option<String>,
    pub dictation: Option<bool>,
    /// Arbitrary metadata echoed back in the response; sent as `extra=key:value`.
    pub extra: Option<HashMap<String, String>>,
    pub filler_words: Option<bool>,
    pub intents: Option<bool>,
    pub keywords: Option<Vec<String>>,
    pub language: Option<String>,
    pub measurements: Option<bool>,
    pub model: Option<String>,
    pub multichannel: Option<bool>,
    pub paragraphs: Option<bool>,
    pub profanity_filter: Option<bool>,
    pub punctuate: Option<bool>,
    pub redact: Option<Vec<String>>,
    pub replace: Option<Vec<String>>,
    pub search: Option<Vec<String>>,
    pub sentiment: Option<bool>,
    pub smart_format: Option<bool>,
    pub summarize: Option<String>,
    pub tag: Option<Vec<String>>,
    pub topics: Option<bool>,
    pub utt_split: Option<f64>,
    pub utterances: Option<bool>,
    pub version: Option<String>,
}

impl_query_parameters!(PrerecordedSchema {
    alternatives => "alternatives",
    callback => "callback",
    callback_method => "callback_method",
    custom_intent => "custom_intent",
    custom_intent_mode => "custom_intent_mode",
    custom_topic => "custom_topic",
    custom_topic_mode => "custom_topic_mode",
    detect_entities => "detect_entities",
    detect_language => "detect_language",
    detect_topics => "detect_topics",
    diarize => "diarize",
    diarize_version => "diarize_version",
    dictation => "dictation",
    extra => "extra",
    filler_words => "filler_words",
    intents => "intents",
    keywords => "keywords",
    language => "language",
    measurements => "measurements",
    model => "model",
    multichannel => "multichannel",
    paragraphs => "paragraphs",
    profanity_filter => "profanity_filter",
    punctuate => "punctuate",
    redact => "redact",
    replace => "replace",
    search => "search",
    sentiment => "sentiment",
    smart_format => "smart_format",
    summarize => "summarize",
    tag => "tag",
    topics => "topics",
    utt_split => "utt_split",
    utterances => "utterances",
    version => "version",
});

impl PrerecordedSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn punctuate(mut self, punctuate: bool) -> Self {
        self.punctuate = Some(punctuate);
        self
    }

    pub fn smart_format(mut self, smart_format: bool) -> Self {
        self.smart_format = Some(smart_format);
        self
    }

    pub fn diarize(mut self, diarize: bool) -> Self {
        self.diarize = Some(diarize);
        self
    }

    pub fn callback(mut self, url: impl Into<String>) -> Self {
        self.callback = Some(url.into());
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Returned by callback-style operations; the transcript is delivered to the callback URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsyncResponse {
    pub request_id: String,
}

/// Synchronous transcription result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncResponse {
    pub metadata: Option<Metadata>,
    pub results: Option<Results>,
}

impl SyncResponse {
    /// Transcript of the first alternative of the first channel.
    pub fn transcript(&self) -> Option<&str> {
        self.results
            .as_ref()?
            .channels
            .first()?
            .alternatives
            .first()
            .map(|a| a.transcript.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub transaction_key: Option<String>,
    pub request_id: Option<String>,
    pub sha256: Option<String>,
    pub created: Option<String>,
    pub duration: Option<f64>,
    pub channels: Option<u32>,
    pub models: Vec<String>,
    pub model_info: HashMap<String, ModelInfo>,
    pub extra: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub arch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Results {
    pub channels: Vec<Channel>,
    pub utterances: Option<Vec<Utterance>>,
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub alternatives: Vec<Alternative>,
    pub detected_language: Option<String>,
    pub search: Option<Vec<SearchResult>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alternative {
    pub transcript: String,
    pub confidence: f64,
    pub words: Vec<Word>,
    pub paragraphs: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Word {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
    pub speaker: Option<u32>,
    pub punctuated_word: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Utterance {
    pub id: Option<String>,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
    pub channel: u32,
    pub transcript: String,
    pub speaker: Option<u32>,
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub confidence: f64,
    pub start: f64,
    pub end: f64,
    pub snippet: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub result: Option<String>,
    pub short: Option<String>,
}
