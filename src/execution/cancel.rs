//! Cancellation utilities
//!
//! Calls observe an optional `CancellationToken`. When it fires, the
//! in-flight future is dropped, which aborts the underlying HTTP exchange.

use std::future::Future;

use crate::error::DeepgramError;

pub use tokio_util::sync::CancellationToken;

/// Run `future` until it completes or `token` is cancelled.
///
/// A token that is already cancelled wins before `future` is polled, so no
/// network I/O happens in that case.
pub async fn with_cancellation<F, T>(
    token: Option<&CancellationToken>,
    future: F,
) -> Result<T, DeepgramError>
where
    F: Future<Output = Result<T, DeepgramError>>,
{
    match token {
        None => future.await,
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(DeepgramError::Cancelled),
                res = future => res,
            }
        }
    }
}
