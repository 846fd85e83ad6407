//! Request extractors

use axum::extract::FromRequest;

use crate::AppError;

/// `axum::Json` whose rejections render as `AppError` (400 + JSON body)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
