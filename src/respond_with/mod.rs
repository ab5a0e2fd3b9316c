//! Constructors for common response shapes.
//!
//! Every constructor returns a [`Response`](crate::Response) value and performs
//! no I/O. `json_or_error` and `template_or_error` double as a model for
//! handler-side error handling: internal failures are logged and answered with
//! a fixed message, never with the underlying error text.

mod basic;
mod encode;
mod redirect;

pub use basic::{bytes, error, status_code, string};
pub use encode::{
    json_or_error, template_or_error, JSON_ERROR_MESSAGE, NIL_TEMPLATE_MESSAGE,
    TEMPLATE_ERROR_MESSAGE,
};
pub use redirect::redirect;

/// An error response whose message is formatted only when arguments follow
/// it. A message on its own is sent unchanged, braces included.
///
/// ```ignore
/// errorf!(StatusCode::BAD_REQUEST, "recipe '{}' does not exist", name)
/// ```
#[macro_export]
macro_rules! errorf {
    ($status:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::respond_with::error($status, format!($fmt, $($arg)+))
    };
    ($status:expr, $msg:expr $(,)?) => {
        $crate::respond_with::error($status, $msg)
    };
}

/// A 200 text response, formatted like [`errorf!`].
#[macro_export]
macro_rules! stringf {
    ($fmt:literal, $($arg:tt)+) => {
        $crate::respond_with::string(format!($fmt, $($arg)+))
    };
    ($msg:expr $(,)?) => {
        $crate::respond_with::string($msg)
    };
}
