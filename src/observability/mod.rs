//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, constructors, adapter fallback
//!     → tracing events with structured fields
//! Response hooks
//!     → hooks.rs (log bytes sent / transfer errors per response)
//! Binary startup
//!     → logging.rs (install the subscriber: EnvFilter + pretty or JSON fmt)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the binary's job
//! - RUST_LOG overrides the configured level

pub mod hooks;
pub mod logging;
