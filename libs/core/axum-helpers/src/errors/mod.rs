pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_config::Environment;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message shown in place of internal error details outside development.
pub const SUPPRESSED_MESSAGE: &str = "Internal server error";

/// Body of every error response.
///
/// ```json
/// {
///   "error": "Validation failed",
///   "details": [
///     { "field": "email", "message": "Please provide a valid email address", "value": "nope" }
///   ]
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error title
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// The rejected input, `null` when the field was missing
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: value.into(),
        }
    }
}

/// Errors that handlers return; each maps to exactly one status and body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Uniqueness violation, detected either before the write or by the store.
    #[error("{error}: {message}")]
    Duplicate { error: String, message: String },

    #[error("{error}: {message}")]
    NotFound { error: String, message: String },

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// Store or other server-side failure. `message` is only shown in development.
    #[error("{error}: {message}")]
    Internal { error: String, message: String },

    #[error("Something went wrong!: {0}")]
    Panic(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) | AppError::Duplicate { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } | AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } | AppError::Panic(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationFailed,
            AppError::InvalidBody(_) => ErrorCode::InvalidBody,
            AppError::Duplicate { .. } => ErrorCode::DuplicateKey,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::RouteNotFound(_) => ErrorCode::RouteNotFound,
            AppError::Internal { .. } => ErrorCode::StoreFailure,
            AppError::Panic(_) => ErrorCode::Panic,
        }
    }

    /// Builds the response body. `expose_internal` controls whether server-side
    /// error messages reach the client.
    pub fn to_body(&self, expose_internal: bool) -> ErrorResponse {
        let internal_message = |message: &str| {
            if expose_internal {
                message.to_string()
            } else {
                SUPPRESSED_MESSAGE.to_string()
            }
        };

        match self {
            AppError::Validation(details) => ErrorResponse {
                error: "Validation failed".to_string(),
                message: None,
                details: Some(details.clone()),
            },
            AppError::InvalidBody(message) => ErrorResponse {
                error: "Invalid request body".to_string(),
                message: Some(message.clone()),
                details: None,
            },
            AppError::Duplicate { error, message } | AppError::NotFound { error, message } => {
                ErrorResponse {
                    error: error.clone(),
                    message: Some(message.clone()),
                    details: None,
                }
            }
            AppError::RouteNotFound(path) => ErrorResponse {
                error: "Route not found".to_string(),
                message: Some(format!("The route {path} does not exist")),
                details: None,
            },
            AppError::Internal { error, message } => ErrorResponse {
                error: error.clone(),
                message: Some(internal_message(message)),
                details: None,
            },
            AppError::Panic(message) => ErrorResponse {
                error: "Something went wrong!".to_string(),
                message: Some(internal_message(message)),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        if code.is_server_error() {
            tracing::error!(error_code = code.code(), error = %self, "Request failed");
        } else {
            tracing::info!(error_code = code.code(), error = %self, "Request rejected");
        }

        let body = self.to_body(Environment::from_env().is_development());
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

/// Flattens validator output into `{field, message, value}` entries.
///
/// Field names are reported in camelCase to match the JSON input, and entries
/// are ordered by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = to_camel_case(&field);
            errs.iter().map(move |err| FieldError {
                field: field.clone(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
                value: err
                    .params
                    .get("value")
                    .cloned()
                    .unwrap_or(serde_json::Value::Null),
            })
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "First name must be between 2 and 50 characters"))]
        first_name: String,
        #[validate(range(min = 0, max = 120))]
        age: i32,
    }

    #[test]
    fn test_camel_case_conversion() {
        assert_eq!(to_camel_case("first_name"), "firstName");
        assert_eq!(to_camel_case("in_stock"), "inStock");
        assert_eq!(to_camel_case("email"), "email");
    }

    #[test]
    fn test_field_errors_from_validator() {
        let sample = Sample {
            first_name: "J".to_string(),
            age: 130,
        };
        let errors = field_errors(&sample.validate().unwrap_err());

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "age");
        assert_eq!(errors[0].message, "range");
        assert_eq!(errors[0].value, serde_json::json!(130));
        assert_eq!(errors[1].field, "firstName");
        assert_eq!(
            errors[1].message,
            "First name must be between 2 and 50 characters"
        );
        assert_eq!(errors[1].value, serde_json::json!("J"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation(vec![]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Duplicate {
                error: "Duplicate entry".into(),
                message: "Email address already exists".into()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::RouteNotFound("/nope".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Panic("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_has_details_only() {
        let err = AppError::Validation(vec![FieldError::new("id", "Invalid ID format", "abc")]);
        let body = serde_json::to_value(err.to_body(false)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "error": "Validation failed",
                "details": [{ "field": "id", "message": "Invalid ID format", "value": "abc" }]
            })
        );
    }

    #[test]
    fn test_internal_message_suppressed_outside_development() {
        let err = AppError::Internal {
            error: "Failed to fetch users".into(),
            message: "connection reset".into(),
        };

        let hidden = err.to_body(false);
        assert_eq!(hidden.error, "Failed to fetch users");
        assert_eq!(hidden.message.as_deref(), Some(SUPPRESSED_MESSAGE));

        let shown = err.to_body(true);
        assert_eq!(shown.message.as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_route_not_found_body() {
        let body = AppError::RouteNotFound("/api/orders".into()).to_body(true);
        assert_eq!(body.error, "Route not found");
        assert_eq!(
            body.message.as_deref(),
            Some("The route /api/orders does not exist")
        );
    }

    #[test]
    fn test_into_response_reads_environment() {
        temp_env::with_var("APP_ENV", Some("production"), || {
            let response = AppError::Internal {
                error: "Failed to create user".into(),
                message: "socket closed".into(),
            }
            .into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        });
    }
}
