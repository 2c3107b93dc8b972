//! Request bodies.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::error::DeepgramError;
use crate::types::{Source, SourceStream};

const OCTET_STREAM: &str = "application/octet-stream";

/// Body attached to an outgoing request.
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Bytes { data: Bytes, content_type: String },
    Stream { stream: SourceStream, content_type: String },
}

impl RequestBody {
    /// Serialize `value` as a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, DeepgramError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    pub(crate) fn apply(self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Empty => builder,
            Self::Json(json) => builder.json(&json),
            Self::Bytes { data, content_type } => {
                builder.header(CONTENT_TYPE, content_type).body(data)
            }
            Self::Stream {
                stream,
                content_type,
            } => builder
                .header(CONTENT_TYPE, content_type)
                .body(reqwest::Body::wrap_stream(stream)),
        }
    }
}

impl From<Source> for RequestBody {
    /// URL sources become `{"url": ...}` for the service to fetch; uploads
    /// are sent as-is.
    fn from(source: Source) -> Self {
        match source {
            Source::Url(url) => Self::Json(serde_json::json!({ "url": url })),
            Source::Buffer { data, mimetype } => Self::Bytes {
                data,
                content_type: mimetype.unwrap_or_else(|| OCTET_STREAM.to_string()),
            },
            Source::Stream { stream, mimetype } => Self::Stream {
                stream,
                content_type: mimetype.unwrap_or_else(|| OCTET_STREAM.to_string()),
            },
        }
    }
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Self::Bytes { data, content_type } => f
                .debug_struct("Bytes")
                .field("len", &data.len())
                .field("content_type", content_type)
                .finish(),
            Self::Stream { content_type, .. } => f
                .debug_struct("Stream")
                .field("content_type", content_type)
                .finish_non_exhaustive(),
        }
    }
}
