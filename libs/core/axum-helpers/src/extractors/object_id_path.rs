//! MongoDB ObjectId path parameter extractor.

use crate::errors::{AppError, FieldError};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use bson::oid::ObjectId;

pub const INVALID_ID_MESSAGE: &str = "Invalid ID format";

/// Extracts a 24-hex-digit ObjectId from the single path parameter.
///
/// Anything else is rejected as a validation failure on field `id`.
///
/// ```ignore
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_user(ObjectIdPath(id): ObjectIdPath) -> String {
///     format!("User ID: {}", id.to_hex())
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_id(serde_json::Value::Null))?;

        parse_object_id(&raw).map(ObjectIdPath)
    }
}

/// Parses an identifier, producing the standard `id` validation error on failure.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| invalid_id(raw.into()))
}

fn invalid_id(value: serde_json::Value) -> AppError {
    AppError::Validation(vec![FieldError::new("id", INVALID_ID_MESSAGE, value)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_object_id() {
        let id = parse_object_id("64b7f0c2a1b2c3d4e5f60718").unwrap();
        assert_eq!(id.to_hex(), "64b7f0c2a1b2c3d4e5f60718");
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for raw in ["123", "not-an-id", "64b7f0c2a1b2c3d4e5f6071z", ""] {
            match parse_object_id(raw) {
                Err(AppError::Validation(details)) => {
                    assert_eq!(details[0].field, "id");
                    assert_eq!(details[0].message, INVALID_ID_MESSAGE);
                    assert_eq!(details[0].value, serde_json::json!(raw));
                }
                other => panic!("expected validation error for {raw:?}, got {other:?}"),
            }
        }
    }
}
