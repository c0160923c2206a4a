//! Request extractors whose rejections render as [`AppError`] JSON.
//!
//! Axum's stock extractors answer bad input with plain-text bodies; these
//! wrappers route every rejection through the same error envelope as the
//! handlers.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use contactdesk_core::error::CoreError;
use serde_json::Value;

use crate::error::AppError;

/// A request body parsed as arbitrary JSON.
///
/// The `Content-Type` header is not checked: any body that parses as JSON
/// is accepted, and anything else is a malformed-input error. Shape and
/// field checks are left to the domain validators.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| AppError::Core(CoreError::MalformedInput(format!("Invalid JSON: {e}"))))
    }
}

/// `Query<T>` with JSON rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// `Path<T>` with JSON rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
