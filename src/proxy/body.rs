//! Streamed body forwarding.

use std::time::Duration;

use bytes::Bytes;
use futures_util::{stream, Stream, StreamExt};
use thiserror::Error;

/// Why a proxied body ended abnormally.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("upstream body failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream body idle for {0:?}")]
    Idle(Duration),
}

/// Forward `inner` chunk by chunk, failing if upstream stays silent longer
/// than `idle`.
///
/// The stream ends after its first error so the client connection is torn
/// down rather than completed with a truncated body.
pub fn with_idle_timeout<S>(
    inner: S,
    idle: Duration,
) -> impl Stream<Item = Result<Bytes, BodyError>> + Send + 'static
where
    S: Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
{
    stream::unfold(Some(Box::pin(inner)), move |state| async move {
        let mut inner = state?;
        match tokio::time::timeout(idle, inner.next()).await {
            Ok(Some(Ok(chunk))) => Some((Ok(chunk), Some(inner))),
            Ok(Some(Err(e))) => {
                tracing::warn!(error = %e, "Upstream body failed mid-stream");
                Some((Err(BodyError::Upstream(e)), None))
            }
            Ok(None) => None,
            Err(_) => {
                tracing::warn!(idle = ?idle, "Upstream body stalled");
                Some((Err(BodyError::Idle(idle)), None))
            }
        }
    })
}
