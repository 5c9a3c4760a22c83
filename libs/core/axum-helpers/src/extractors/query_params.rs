//! Query string extractor that rejects with the standard error body.

use crate::errors::{AppError, FieldError};
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Like [`Query`], but a query string that does not deserialize (for example
/// a repeated `?page=1&page=2`) becomes a validation failure on field `query`
/// carrying the raw query string.
///
/// ```ignore
/// async fn list_users(QueryParams(query): QueryParams<UserListQuery>) { /* ... */ }
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or_default().to_string();

        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::Validation(vec![FieldError::new("query", rejection.body_text(), raw)])
            })?;

        Ok(QueryParams(value))
    }
}
