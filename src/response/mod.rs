//! Responses as values.
//!
//! # Data Flow
//! ```text
//! pure handler / respond_with constructor
//!     → Response { status, body, header_options, hooks }
//!     → decorators (with_hooks, with_header_options) extend it by value
//!     → IntoResponse (the single terminal operation)
//!         1. header options applied in order
//!         2. status committed (only when set)
//!         3. body streamed through a byte-counting TransferBody
//!         4. hooks run once the transfer resolves
//! ```
//!
//! # Design Decisions
//! - A `Response` performs no I/O until it is converted; handlers cannot
//!   respond twice because they return exactly one value
//! - `status: None` is the zero value; the transport default (200) applies
//! - Header options are applied before the status is committed so every
//!   decorator-applied header is visible to the client
//! - `HEAD` requests never read the body, so `into_head_response` skips the
//!   transfer and reports a clean finish with zero bytes sent
//! - Decorators take `self` by value; branching off a shared base goes through
//!   `try_clone`, which gives each branch its own option and hook vectors

pub mod body;

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_LENGTH;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use bytes::Bytes;
use http_body::Body as _;

pub use body::{ResponseBody, TransferError};

use self::body::{run_hooks, TransferBody};

/// A mutation of the outgoing header collection.
pub type HeaderOption = Arc<dyn Fn(&mut HeaderMap) + Send + Sync>;

/// Runs after the body transfer resolved, with the number of bytes sent and
/// the transfer error, if any.
pub type Hook = Arc<dyn Fn(u64, Option<&TransferError>) + Send + Sync>;

/// Describes how to answer a request and what to do afterward.
#[derive(Default)]
pub struct Response {
    /// Explicit status to send. `None` leaves the default (200 OK).
    pub status: Option<StatusCode>,

    /// Optional body. A streaming body is read at most once.
    pub body: Option<ResponseBody>,

    /// Header mutations, applied in order. Later options win on the same key.
    pub header_options: Vec<HeaderOption>,

    /// Completion callbacks, run in registration order.
    pub hooks: Vec<Hook>,
}

impl Response {
    /// A response with the given status and no body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Replace the body.
    pub fn body(mut self, body: impl Into<ResponseBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Append the given hooks and return the result.
    pub fn with_hooks<I>(mut self, hooks: I) -> Self
    where
        I: IntoIterator<Item = Hook>,
    {
        self.hooks.extend(hooks);
        self
    }

    /// Append a single hook.
    pub fn with_hook<F>(self, hook: F) -> Self
    where
        F: Fn(u64, Option<&TransferError>) + Send + Sync + 'static,
    {
        self.with_hooks([Arc::new(hook) as Hook])
    }

    /// Append the given header options and return the result.
    pub fn with_header_options<I>(mut self, opts: I) -> Self
    where
        I: IntoIterator<Item = HeaderOption>,
    {
        self.header_options.extend(opts);
        self
    }

    /// Append a single header option.
    pub fn with_header_option<F>(self, opt: F) -> Self
    where
        F: Fn(&mut HeaderMap) + Send + Sync + 'static,
    {
        self.with_header_options([Arc::new(opt) as HeaderOption])
    }

    /// Duplicate the response so it can be decorated along two branches.
    ///
    /// Returns `None` when the body is a stream, which can only be read once.
    pub fn try_clone(&self) -> Option<Self> {
        let body = match &self.body {
            None => None,
            Some(ResponseBody::Full(bytes)) => Some(ResponseBody::Full(bytes.clone())),
            Some(ResponseBody::Stream(_)) => return None,
        };

        Some(Self {
            status: self.status,
            body,
            header_options: self.header_options.clone(),
            hooks: self.hooks.clone(),
        })
    }

    /// The header collection this response would produce.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for opt in &self.header_options {
            opt(&mut headers);
        }
        headers
    }

    /// The buffered body, if the body is not a stream.
    pub fn body_bytes(&self) -> Option<&Bytes> {
        match &self.body {
            Some(ResponseBody::Full(bytes)) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("body", &self.body)
            .field("header_options", &self.header_options.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Response {
    /// Convert for a `HEAD` request. The body is dropped unread, its length
    /// is kept as `Content-Length` when known, and the hooks run at once with
    /// `(0, None)`.
    pub fn into_head_response(self) -> axum::response::Response {
        self.into_http(false)
    }

    fn into_http(self, send_body: bool) -> axum::response::Response {
        let mut headers = self.headers();
        let Response {
            status,
            body,
            hooks,
            ..
        } = self;

        let body = match body {
            Some(body) if send_body => Body::new(TransferBody::new(body.into_body(), hooks)),
            Some(body) => {
                if let Some(len) = body.into_body().size_hint().exact() {
                    headers.entry(CONTENT_LENGTH).or_insert(HeaderValue::from(len));
                }
                run_hooks(&hooks, 0, None);
                Body::empty()
            }
            None => {
                run_hooks(&hooks, 0, None);
                Body::empty()
            }
        };

        let mut res = axum::response::Response::new(body);
        *res.headers_mut() = headers;
        if let Some(status) = status {
            *res.status_mut() = status;
        }
        res
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        self.into_http(true)
    }
}
