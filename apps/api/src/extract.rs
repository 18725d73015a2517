//! Request extractors whose rejections render through `AppError`.
//!
//! Axum's stock `Json`/`Path`/`Query` answer malformed input with a plain-text
//! body; these wrappers turn the same failures into a 400 `VALIDATION_ERROR`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
