//! Retry helpers for callers that want them.

pub mod policy;

pub use policy::{RetryExecutor, RetryPolicy, retry_with_default};
