//! Request extractors.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections rendered as [`AppError::BadRequest`].
///
/// Malformed JSON, a missing `Content-Type` and type mismatches all become
/// a 400 with the standard error body instead of axum's plain-text 4xx.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
