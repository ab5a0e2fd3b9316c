//! Text and byte responses.

use axum::http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use bytes::Bytes;

use crate::response::Response;

pub(crate) fn set_plain_text(hdr: &mut HeaderMap) {
    hdr.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    hdr.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
}

pub(crate) fn set_content_json(hdr: &mut HeaderMap) {
    hdr.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
}

/// A plain-text error with the given status. Sets
/// `Content-Type: text/plain; charset=utf-8` and
/// `X-Content-Type-Options: nosniff`.
pub fn error(status: StatusCode, message: impl Into<String>) -> Response {
    let message: String = message.into();
    Response::new(status)
        .body(message)
        .with_header_option(set_plain_text)
}

/// The given status with its reason phrase as the body.
pub fn status_code(status: StatusCode) -> Response {
    Response::new(status).body(status.canonical_reason().unwrap_or(""))
}

/// Status 200 with the given text.
pub fn string(message: impl Into<String>) -> Response {
    let message: String = message.into();
    Response::new(StatusCode::OK).body(message)
}

/// The given status with `data` as the body, verbatim.
pub fn bytes(status: StatusCode, data: impl Into<Bytes>) -> Response {
    let data: Bytes = data.into();
    Response::new(status).body(data)
}
