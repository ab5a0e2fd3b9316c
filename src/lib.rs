//! Responses as return values for axum handlers.
//!
//! A handler built on this crate never writes to the connection. It returns a
//! [`Response`] describing the status, headers, body and post-response hooks,
//! and the adapter from [`with`] performs the I/O exactly once, in a fixed
//! order. Constructors for common shapes live in [`respond_with`].
//!
//! The `bread` module and the `bread-recipes` binary are a small application
//! built on top of the library.

pub mod bread;
pub mod config;
pub mod handler;
pub mod lifecycle;
pub mod observability;
pub mod respond_with;
pub mod response;
pub mod server;

pub use config::ServerConfig;
pub use handler::{with, with_optional, Handler, Params};
pub use lifecycle::Shutdown;
pub use response::{HeaderOption, Hook, Response, ResponseBody, TransferError};
pub use server::HttpServer;
