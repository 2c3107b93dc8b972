//! Request execution
//!
//! Everything between an endpoint method and the wire: header handling,
//! request bodies, cancellation, interceptors and the verb dispatcher.

pub mod body;
pub mod cancel;
pub mod headers;
pub mod http_client;
pub mod interceptor;
pub mod response;
pub mod rest;

pub use body::RequestBody;
pub use cancel::{CancellationToken, with_cancellation};
pub use headers::{HttpHeaderBuilder, extract_headers};
pub use http_client::build_http_client_from_config;
pub use interceptor::{HttpInterceptor, HttpRequestContext, LoggingInterceptor};
pub use response::{BinaryResponse, ByteStream, DispatchOutcome, ResponseDecoding};
pub use rest::RestClient;
