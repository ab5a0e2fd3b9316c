//! The bridge from pure handlers to axum.

use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::{FromRequestParts, RawPathParams, Request};
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use futures_util::FutureExt;

use crate::handler::params::Params;
use crate::respond_with;
use crate::response::Response;

/// A function from a request and its routing parameters to a [`Response`].
///
/// Implemented for every `Fn(Request, Params) -> impl Future<Output = Response>`
/// that can be shared across requests.
pub trait Handler: Clone + Send + Sync + 'static {
    type Future: Future<Output = Response> + Send + 'static;

    fn call(&self, req: Request, params: Params) -> Self::Future;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request, Params) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    type Future = Fut;

    fn call(&self, req: Request, params: Params) -> Self::Future {
        self(req, params)
    }
}

/// Why the fallback was invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The adapter was built without a handler.
    MissingHandler,
    /// The handler panicked with the given message.
    Panic(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::MissingHandler => write!(f, "no handler registered"),
            FailureCause::Panic(msg) => write!(f, "handler panicked: {}", msg),
        }
    }
}

/// The request a handler failed to answer.
#[derive(Debug, Clone)]
pub struct Failure {
    pub method: Method,
    pub uri: Uri,
    pub cause: FailureCause,
}

/// Produces the response used when no handler response is available.
pub type Fallback = Arc<dyn Fn(&Failure) -> Response + Send + Sync>;

/// Logs the failure with a backtrace of the adapter and answers 500.
pub fn default_fallback(failure: &Failure) -> Response {
    tracing::error!(
        method = %failure.method,
        uri = %failure.uri,
        cause = %failure.cause,
        backtrace = %Backtrace::capture(),
        "Handler produced no response"
    );
    respond_with::status_code(StatusCode::INTERNAL_SERVER_ERROR)
}

/// A pure handler adapted into an axum handler.
#[derive(Clone)]
pub struct With<H> {
    handler: Option<H>,
    fallback: Fallback,
}

/// Adapt `handler` so it can be registered on an axum route.
///
/// ```ignore
/// router.route("/", get(handle::with(|_req, _params| async {
///     handle::stringf!("Hello, World!")
/// })));
/// ```
pub fn with<H: Handler>(handler: H) -> With<H> {
    with_optional(Some(handler))
}

/// Like [`with`], but a missing handler answers through the fallback.
pub fn with_optional<H: Handler>(handler: Option<H>) -> With<H> {
    With {
        handler,
        fallback: Arc::new(default_fallback),
    }
}

impl<H: Handler> With<H> {
    /// Replace the fallback used for panics and missing handlers.
    pub fn fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&Failure) -> Response + Send + Sync + 'static,
    {
        self.fallback = Arc::new(fallback);
        self
    }

    /// Run the handler for one request and return the unconverted response.
    pub async fn respond(self, req: Request) -> Response {
        let (mut parts, body) = req.into_parts();
        let params = match RawPathParams::from_request_parts(&mut parts, &()).await {
            Ok(raw) => Params::from(&raw),
            Err(_) => Params::default(),
        };

        let method = parts.method.clone();
        let uri = parts.uri.clone();
        let req = Request::from_parts(parts, body);

        let cause = match self.handler {
            Some(handler) => {
                let call = async move { handler.call(req, params).await };
                match AssertUnwindSafe(call).catch_unwind().await {
                    Ok(res) => return res,
                    Err(payload) => FailureCause::Panic(panic_message(payload.as_ref())),
                }
            }
            None => FailureCause::MissingHandler,
        };

        (self.fallback)(&Failure { method, uri, cause })
    }
}

impl<H, S> axum::handler::Handler<Params, S> for With<H>
where
    H: Handler,
    S: Send + Sync + 'static,
{
    type Future = Pin<Box<dyn Future<Output = axum::response::Response> + Send>>;

    fn call(self, req: Request, _state: S) -> Self::Future {
        Box::pin(async move {
            let head = req.method() == Method::HEAD;
            let res = self.respond(req).await;
            if head {
                res.into_head_response()
            } else {
                res.into_response()
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
