//! Shared request types.

pub mod call;
pub mod http;
pub mod source;

pub use call::CallOptions;
pub use http::HttpConfig;
pub use source::{Source, SourceStream};
