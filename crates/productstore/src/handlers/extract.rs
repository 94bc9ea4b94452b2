//! Extractors whose rejections go through [`AppError`], so every error body
//! has the same JSON shape.

use axum::extract::{FromRequest, FromRequestParts};

use super::AppError;

/// `axum::Json` with a JSON error body on rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with a JSON error body on rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
