use axum_helpers::{AppError, FieldError, errors::field_errors};
use bson::oid::ObjectId;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ObjectId),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Maps to the HTTP error. `failure` titles store failures, e.g.
    /// "Failed to fetch products".
    pub fn into_app_error(self, failure: &str) -> AppError {
        match self {
            ProductError::NotFound(id) => AppError::NotFound {
                error: "Product not found".to_string(),
                message: format!("No product found with ID: {}", id.to_hex()),
            },
            ProductError::Validation(details) => AppError::Validation(details),
            ProductError::Database(message) => AppError::Internal {
                error: failure.to_string(),
                message,
            },
        }
    }
}

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        ProductError::Validation(field_errors(&errors))
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_message_includes_id() {
        let id = ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60720").unwrap();
        let err = ProductError::NotFound(id).into_app_error("Failed to fetch product");

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        let body = err.to_body(true);
        assert_eq!(body.error, "Product not found");
        assert_eq!(
            body.message.as_deref(),
            Some("No product found with ID: 64b7f0c2a1b2c3d4e5f60720")
        );
    }

    #[test]
    fn test_database_error_message_suppressed_outside_development() {
        let err = ProductError::Database("connection reset".into())
            .into_app_error("Failed to fetch products");

        let body = err.to_body(false);
        assert_eq!(body.error, "Failed to fetch products");
        assert_eq!(body.message.as_deref(), Some("Internal server error"));
    }
}
