//! Configuration for the recipe server.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks, all errors reported)
//!     → ServerConfig (validated, immutable)
//!     → CLI flags override individual fields in main
//! ```
//!
//! # Design Decisions
//! - Every field has a default so an empty file is a valid config
//! - Serde handles syntax; validation handles meaning

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, LogFormat, LoggingConfig, ServerConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
