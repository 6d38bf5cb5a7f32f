//! # Identity Module
//!
//! Resolves the authenticated caller for each request. Identity is
//! established by an upstream collaborator (gateway or reverse proxy)
//! which forwards the verified numeric user id in the `X-User-Id`
//! header; handlers trust that value unconditionally.
//!
//! Requests without a well-formed id are rejected with 401 before any
//! handler runs.

use axum::http::{request::Parts, HeaderMap};
use axum::extract::FromRequestParts;
use bookline_core::errors::BookingError;

use crate::middleware::error_handling::AppError;

/// Header carrying the verified user id, set by the upstream identity
/// collaborator.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Verified caller identity extracted from request headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthedUser {
    pub owner_id: i64,
}

/// Parses the forwarded user id out of the request headers.
pub fn owner_id_from_headers(headers: &HeaderMap) -> Result<i64, BookingError> {
    let value = headers.get(USER_ID_HEADER).ok_or_else(|| {
        BookingError::Authentication("Missing X-User-Id header".to_string())
    })?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| BookingError::Authentication("Invalid X-User-Id header".to_string()))
}

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner_id = owner_id_from_headers(&parts.headers)?;
        Ok(AuthedUser { owner_id })
    }
}
