//! Response decoding.
//!
//! Every verb goes through one dispatch path; how the success body is
//! handled is chosen by [`ResponseDecoding`].

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::Stream;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::DeepgramError;

/// How a success response body is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseDecoding {
    /// Buffer the body for JSON decoding.
    Json,
    /// Leave the body unread; extract the allow-listed vendor headers.
    BinaryWithHeaders(Vec<String>),
    /// Ignore the body.
    Empty,
}

/// What a dispatch produced, matching the requested [`ResponseDecoding`].
#[derive(Debug)]
pub enum DispatchOutcome {
    Json(Bytes),
    Binary(BinaryResponse),
    Empty,
}

impl DispatchOutcome {
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, DeepgramError> {
        match self {
            Self::Json(bytes) => decode_json(&bytes),
            other => Err(DeepgramError::Decode {
                message: format!("expected a JSON body, got {}", other.kind()),
                body: String::new(),
            }),
        }
    }

    pub fn into_binary(self) -> Result<BinaryResponse, DeepgramError> {
        match self {
            Self::Binary(binary) => Ok(binary),
            other => Err(DeepgramError::Decode {
                message: format!("expected a binary body, got {}", other.kind()),
                body: String::new(),
            }),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Binary(_) => "binary",
            Self::Empty => "empty",
        }
    }
}

/// Decode a success body, keeping the raw text on failure.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DeepgramError> {
    serde_json::from_slice(bytes).map_err(|e| DeepgramError::Decode {
        message: e.to_string(),
        body: String::from_utf8_lossy(bytes).into_owned(),
    })
}

/// Header metadata plus the unread body of a binary response.
#[derive(Debug)]
pub struct BinaryResponse {
    /// Allow-listed headers under their short keys.
    pub headers: HashMap<String, String>,
    pub body: ByteStream,
}

impl BinaryResponse {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

type BoxByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, DeepgramError>> + Send>>;

/// Response body delivered chunk by chunk.
///
/// Reading honours the cancellation token of the call that produced it: once
/// cancelled, the stream yields `Err(Cancelled)` and ends, dropping the
/// connection.
pub struct ByteStream {
    inner: BoxByteStream,
}

impl ByteStream {
    pub(crate) fn from_response(
        response: reqwest::Response,
        cancellation: Option<CancellationToken>,
    ) -> Self {
        let mut body = Box::pin(response.bytes_stream());
        let s = async_stream::stream! {
            loop {
                let next = match &cancellation {
                    Some(token) => tokio::select! {
                        biased;
                        _ = token.cancelled() => None,
                        item = body.next() => Some(item),
                    },
                    None => Some(body.next().await),
                };
                let Some(item) = next else {
                    yield Err(DeepgramError::Cancelled);
                    break;
                };
                match item {
                    Some(Ok(chunk)) => yield Ok(chunk),
                    Some(Err(e)) => {
                        yield Err(DeepgramError::from(e));
                        break;
                    }
                    None => break,
                }
            }
        };
        Self { inner: Box::pin(s) }
    }

    /// A stream over an in-memory body.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            inner: Box::pin(futures::stream::once(async move { Ok(bytes) })),
        }
    }

    /// Read the remaining body into memory.
    pub async fn collect(mut self) -> Result<Bytes, DeepgramError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl Stream for ByteStream {
    type Item = Result<Bytes, DeepgramError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Flag {
        ok: bool,
    }

    #[test]
    fn decode_failure_keeps_body() {
        let err = decode_json::<Flag>(b"{\"ok\":\"yes\"}").unwrap_err();
        match err {
            DeepgramError::Decode { body, .. } => assert_eq!(body, "{\"ok\":\"yes\"}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn outcome_kind_mismatch_is_decode_error() {
        let err = DispatchOutcome::Empty.into_json::<Flag>().unwrap_err();
        assert!(matches!(err, DeepgramError::Decode { .. }));

        let ok = DispatchOutcome::Json(Bytes::from_static(b"{\"ok\":true}"))
            .into_json::<Flag>()
            .unwrap();
        assert_eq!(ok, Flag { ok: true });
    }

    #[tokio::test]
    async fn byte_stream_collects() {
        let body = ByteStream::from_bytes(&b"RIFF....WAVE"[..]).collect().await.unwrap();
        assert_eq!(body.as_ref(), b"RIFF....WAVE");
    }
}
