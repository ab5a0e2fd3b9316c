//! Pure handler execution.
//!
//! # Data Flow
//! ```text
//! axum Router (route match, path parameters)
//!     → adapter.rs (With<H>: axum handler)
//!         → params.rs (raw path parameters → Params)
//!         → H::call(request, params) → Response   (no output I/O yet)
//!         → panic / missing handler → Fallback → Response
//!     → Response::into_response (headers, status, body, hooks)
//! ```
//!
//! # Design Decisions
//! - The handler contract is `(Request, Params) → Response`; nothing else
//! - The adapter never fails: panics and missing handlers become a fallback
//!   response, transfer failures become hook arguments
//! - Handlers may be invoked concurrently for distinct requests; the adapter
//!   holds no per-request state between calls

pub mod adapter;
pub mod params;

pub use adapter::{
    default_fallback, with, with_optional, Failure, FailureCause, Fallback, Handler, With,
};
pub use params::Params;
