//! Ready-made response hooks.

use std::sync::Arc;

use crate::response::{Hook, TransferError};

/// A hook that logs the outcome of a body transfer under `label`.
///
/// Completed transfers are logged at debug level, failed ones at warn.
pub fn log_outcome(label: &'static str) -> Hook {
    Arc::new(move |transferred: u64, err: Option<&TransferError>| match err {
        None => tracing::debug!(response = label, bytes = transferred, "Response sent"),
        Some(e) => tracing::warn!(
            response = label,
            bytes = transferred,
            error = %e,
            "Response transfer failed"
        ),
    })
}
