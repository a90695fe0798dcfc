//! Extractors that reject requests with the crate's JSON errors.

use axum::extract::FromRequestParts;

use crate::Error;

/// A path parameter, e.g. the `{product_id}` in '/api/product/{product_id}/'.
///
/// A parameter that does not parse, such as a non-numeric ID, cannot name an
/// existing record and is answered with [Error::NotFound].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct Path<T>(pub T);
