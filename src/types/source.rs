//! Source references for submitted audio.

use std::fmt;
use std::path::Path;
use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::error::DeepgramError;

/// Chunked audio supplied by the caller.
pub type SourceStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Where the content to submit comes from.
///
/// A `Url` is handed to the service to fetch; it is never downloaded here.
/// `Buffer` and `Stream` are uploaded as the request body.
pub enum Source {
    Url(String),
    Buffer {
        data: Bytes,
        mimetype: Option<String>,
    },
    Stream {
        stream: SourceStream,
        mimetype: Option<String>,
    },
}

impl Source {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn buffer(data: impl Into<Bytes>) -> Self {
        Self::Buffer {
            data: data.into(),
            mimetype: None,
        }
    }

    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
    {
        Self::Stream {
            stream: Box::pin(stream),
            mimetype: None,
        }
    }

    /// Stream any async reader as the request body.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self::stream(ReaderStream::new(reader))
    }

    /// Open `path` for streaming upload, guessing the mimetype from its extension.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, DeepgramError> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            DeepgramError::validation(format!("cannot open '{}': {e}", path.display()))
        })?;
        let mimetype = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string());
        Ok(Self::Stream {
            stream: Box::pin(ReaderStream::new(file)),
            mimetype,
        })
    }

    /// Override the content type sent with an uploaded body. Ignored for URLs.
    pub fn with_mimetype(self, mimetype: impl Into<String>) -> Self {
        match self {
            Self::Url(url) => Self::Url(url),
            Self::Buffer { data, .. } => Self::Buffer {
                data,
                mimetype: Some(mimetype.into()),
            },
            Self::Stream { stream, .. } => Self::Stream {
                stream,
                mimetype: Some(mimetype.into()),
            },
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.debug_tuple("Url").field(url).finish(),
            Self::Buffer { data, mimetype } => f
                .debug_struct("Buffer")
                .field("len", &data.len())
                .field("mimetype", mimetype)
                .finish(),
            Self::Stream { mimetype, .. } => f
                .debug_struct("Stream")
                .field("mimetype", mimetype)
                .finish_non_exhaustive(),
        }
    }
}

impl From<Bytes> for Source {
    fn from(data: Bytes) -> Self {
        Self::buffer(data)
    }
}

impl From<Vec<u8>> for Source {
    fn from(data: Vec<u8>) -> Self {
        Self::buffer(data)
    }
}
