//! Error Handling Module
//!
//! A single error enum covers every failure the client can surface:
//! - `Validation`: caller arguments broke a precondition, raised before any I/O
//! - `Transport`: the server answered with a non-success status, or the
//!   connection itself failed
//! - `Decode`: a successful response did not have the expected shape
//! - `Cancelled`: the call was aborted through its cancellation token
//!
//! # Example
//!
//! ```rust,ignore
//! use deepgram_rest::error::{DeepgramError, ErrorCategory};
//!
//! let error = DeepgramError::http_status(404, "Not found");
//! assert_eq!(error.category(), ErrorCategory::Transport);
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Errors returned by the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeepgramError {
    /// A caller-supplied argument violates a precondition.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-success HTTP status, or a connection-level failure (`status` is `None`).
    #[error("Transport error: {message}")]
    Transport {
        status: Option<u16>,
        body: Option<String>,
        message: String,
    },

    /// A success response body could not be parsed into the expected type.
    #[error("Decode error: {message}")]
    Decode { message: String, body: String },

    /// The call was aborted through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,

    /// The client could not be constructed from the supplied settings.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification used by retry conditions and callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Transport,
    Decode,
    Cancelled,
    Configuration,
}

impl DeepgramError {
    /// Transport error for a completed call with a non-success status.
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            body: Some(body.into()),
            message: format!("HTTP {status}"),
        }
    }

    /// Transport error for a call that never produced a status.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            body: None,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::Decode { .. } => ErrorCategory::Decode,
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::Configuration(_) | Self::Serialization(_) => ErrorCategory::Configuration,
        }
    }

    /// HTTP status code, when the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw response body carried by transport and decode failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Transport { body, .. } => body.as_deref(),
            Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    ///
    /// Connection failures, 408, 429 and 5xx are retryable. Everything that
    /// would fail identically on a second attempt is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { status: None, .. } => true,
            Self::Transport {
                status: Some(code), ..
            } => *code == 408 || *code == 429 || *code >= 500,
            _ => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<reqwest::Error> for DeepgramError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Transport {
                status: err.status().map(|s| s.as_u16()),
                body: None,
                message: format!("request timed out: {err}"),
            };
        }
        Self::Transport {
            status: err.status().map(|s| s.as_u16()),
            body: None,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DeepgramError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
