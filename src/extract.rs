//! Request extraction helpers
//!
//! `AppJson` deserializes a JSON body like `axum::Json` but routes
//! rejections through the application error taxonomy, so a missing or
//! malformed field answers with the same 400 envelope as every other
//! validation failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
