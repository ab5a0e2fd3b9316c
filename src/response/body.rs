//! Response bodies and transfer accounting.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use axum::body::Body;
use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};
use thiserror::Error;

use super::Hook;

/// The body of a [`Response`](super::Response).
pub enum ResponseBody {
    /// Buffered bytes. Can be cloned along with the response.
    Full(Bytes),
    /// A stream that is read at most once.
    Stream(Body),
}

impl ResponseBody {
    pub(crate) fn into_body(self) -> Body {
        match self {
            Self::Full(bytes) => Body::from(bytes),
            Self::Stream(body) => body,
        }
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            Self::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

impl From<Bytes> for ResponseBody {
    fn from(bytes: Bytes) -> Self {
        Self::Full(bytes)
    }
}

impl From<Vec<u8>> for ResponseBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Full(Bytes::from(bytes))
    }
}

impl From<String> for ResponseBody {
    fn from(s: String) -> Self {
        Self::Full(Bytes::from(s))
    }
}

impl From<&'static str> for ResponseBody {
    fn from(s: &'static str) -> Self {
        Self::Full(Bytes::from_static(s.as_bytes()))
    }
}

impl From<Body> for ResponseBody {
    fn from(body: Body) -> Self {
        Self::Stream(body)
    }
}

/// Failure while sending a response body. Reported to hooks, never raised.
#[derive(Debug, Clone, Error)]
pub enum TransferError {
    /// The body stream itself produced an error.
    #[error("response body stream failed: {0}")]
    Body(#[source] Arc<axum::Error>),

    /// The transport dropped the body before it was fully sent, typically
    /// because the client went away.
    #[error("response body aborted after {transferred} bytes")]
    Aborted { transferred: u64 },
}

pub(crate) fn run_hooks(hooks: &[Hook], transferred: u64, err: Option<&TransferError>) {
    for hook in hooks {
        hook(transferred, err);
    }
}

/// Wraps the outgoing body, counting data bytes and running the hooks exactly
/// once when the transfer ends, fails, or is dropped.
pub(crate) struct TransferBody {
    inner: Body,
    transferred: u64,
    hooks: Option<Vec<Hook>>,
}

impl TransferBody {
    pub(crate) fn new(inner: Body, hooks: Vec<Hook>) -> Self {
        Self {
            inner,
            transferred: 0,
            hooks: Some(hooks),
        }
    }

    fn finish(&mut self, err: Option<&TransferError>) {
        if let Some(hooks) = self.hooks.take() {
            run_hooks(&hooks, self.transferred, err);
        }
    }
}

impl HttpBody for TransferBody {
    type Data = Bytes;
    type Error = TransferError;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        match ready!(Pin::new(&mut this.inner).poll_frame(cx)) {
            Some(Ok(frame)) => {
                if let Some(data) = frame.data_ref() {
                    this.transferred += data.len() as u64;
                }
                Poll::Ready(Some(Ok(frame)))
            }
            Some(Err(err)) => {
                let err = TransferError::Body(Arc::new(err));
                this.finish(Some(&err));
                Poll::Ready(Some(Err(err)))
            }
            None => {
                this.finish(None);
                Poll::Ready(None)
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for TransferBody {
    fn drop(&mut self) {
        if self.hooks.is_none() {
            return;
        }

        // the transport may stop polling once the size hint is exhausted
        if self.inner.is_end_stream() {
            self.finish(None);
        } else {
            let err = TransferError::Aborted {
                transferred: self.transferred,
            };
            self.finish(Some(&err));
        }
    }
}
