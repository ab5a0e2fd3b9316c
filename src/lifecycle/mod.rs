//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Ctrl+C (signals.rs) ──┐
//! test / embedding code ┴→ Shutdown::trigger
//!     → every subscriber's receiver resolves
//!     → HttpServer stops accepting and drains in-flight requests
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::trigger_on_ctrl_c;
