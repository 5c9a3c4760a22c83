use axum_helpers::{AppError, FieldError, errors::field_errors};
use bson::oid::ObjectId;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(ObjectId),

    /// Caught by the pre-write uniqueness check
    #[error("Email '{email}' already belongs to another user")]
    EmailTaken { email: String, on_update: bool },

    /// Raised by the store's unique index
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Maps to the HTTP error. `failure` titles store failures, e.g.
    /// "Failed to fetch users".
    pub fn into_app_error(self, failure: &str) -> AppError {
        match self {
            UserError::NotFound(id) => AppError::NotFound {
                error: "User not found".to_string(),
                message: format!("No user found with ID: {}", id.to_hex()),
            },
            UserError::EmailTaken { on_update, .. } => AppError::Duplicate {
                error: "Email already exists".to_string(),
                message: if on_update {
                    "Another user with this email address already exists"
                } else {
                    "A user with this email address already exists"
                }
                .to_string(),
            },
            UserError::DuplicateKey(_) => AppError::Duplicate {
                error: "Duplicate entry".to_string(),
                message: "Email address already exists".to_string(),
            },
            UserError::Validation(details) => AppError::Validation(details),
            UserError::Database(message) => AppError::Internal {
                error: failure.to_string(),
                message,
            },
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            UserError::EmailTaken { .. } | UserError::DuplicateKey(_)
        )
    }
}

impl From<ValidationErrors> for UserError {
    fn from(errors: ValidationErrors) -> Self {
        UserError::Validation(field_errors(&errors))
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if database::mongodb::is_duplicate_key(&err) {
            UserError::DuplicateKey(err.to_string())
        } else {
            UserError::Database(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_message_includes_id() {
        let id = ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap();
        let body = UserError::NotFound(id)
            .into_app_error("Failed to fetch user")
            .to_body(true);

        assert_eq!(body.error, "User not found");
        assert_eq!(
            body.message.as_deref(),
            Some("No user found with ID: 64b7f0c2a1b2c3d4e5f60718")
        );
    }

    #[test]
    fn test_duplicate_messages() {
        let create = UserError::EmailTaken {
            email: "a@b.co".into(),
            on_update: false,
        }
        .into_app_error("Failed to create user");
        assert_eq!(create.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            create.to_body(true).message.as_deref(),
            Some("A user with this email address already exists")
        );

        let update = UserError::EmailTaken {
            email: "a@b.co".into(),
            on_update: true,
        }
        .into_app_error("Failed to update user");
        assert_eq!(
            update.to_body(true).message.as_deref(),
            Some("Another user with this email address already exists")
        );

        let store = UserError::DuplicateKey("E11000".into()).into_app_error("Failed to create user");
        let body = store.to_body(true);
        assert_eq!(body.error, "Duplicate entry");
        assert_eq!(body.message.as_deref(), Some("Email address already exists"));
    }

    #[test]
    fn test_database_error_uses_failure_title() {
        let err = UserError::Database("timeout".into()).into_app_error("Failed to delete user");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_body(false).error, "Failed to delete user");
    }
}
