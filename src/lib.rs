//! # deepgram-rest
//!
//! Async REST client for the Deepgram speech API: pre-recorded
//! transcription, text-to-speech and project management.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,ignore
//! use deepgram_rest::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DeepgramError> {
//!     let client = DeepgramClient::from_env()?;
//!     let options = PrerecordedSchema::new().model("nova-2").punctuate(true);
//!     let response = client
//!         .listen()
//!         .transcribe_url("https://dpgr.am/spacewalk.wav", &options, &CallOptions::new())
//!         .await?;
//!     println!("{}", response.transcript().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Layout
//!
//! - [`query`]: option structs to query strings
//! - [`execution`]: the verb dispatcher, header extraction, cancellation
//! - [`callback`]: validation of the two ways to request callback delivery
//! - [`clients`]: one client per API area, built on the above
//! - [`retry`]: opt-in retries; nothing in the crate retries on its own

pub mod callback;
pub mod client;
pub mod clients;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod models;
pub mod query;
pub mod retry;
pub mod types;

pub use client::{DeepgramClient, DeepgramClientBuilder};
pub use error::{DeepgramError, ErrorCategory};
pub use execution::{BinaryResponse, ByteStream, CancellationToken, HttpInterceptor};
pub use types::{CallOptions, HttpConfig, Source};

/// Common imports.
pub mod prelude {
    pub use crate::client::{DeepgramClient, DeepgramClientBuilder};
    pub use crate::error::DeepgramError;
    pub use crate::execution::CancellationToken;
    pub use crate::models::listen::{AsyncResponse, PrerecordedSchema, SyncResponse};
    pub use crate::models::manage::{KeySchema, ProjectSchema};
    pub use crate::models::speak::{SpeakSchema, SpeakStream};
    pub use crate::query::{QueryParameters, QueryString};
    pub use crate::retry::{RetryExecutor, RetryPolicy};
    pub use crate::types::{CallOptions, Source};
}
