//! Error codes attached to every logged error response.
//!
//! Codes never appear in response bodies; they exist so log queries can group
//! failures without parsing messages.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::ValidationFailed.as_str(), "VALIDATION_FAILED");
//! assert_eq!(ErrorCode::ValidationFailed.code(), 1001);
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    ValidationFailed,
    InvalidBody,
    DuplicateKey,
    NotFound,
    RouteNotFound,

    // Server errors (5000-5999)
    StoreFailure,
    Panic,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidBody => "INVALID_BODY",
            Self::DuplicateKey => "DUPLICATE_KEY",
            Self::NotFound => "NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::StoreFailure => "STORE_FAILURE",
            Self::Panic => "PANIC",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationFailed => 1001,
            Self::InvalidBody => 1002,
            Self::DuplicateKey => 1003,
            Self::NotFound => 1004,
            Self::RouteNotFound => 1005,
            Self::StoreFailure => 5001,
            Self::Panic => 5002,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.code() >= 5000
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let all = [
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidBody,
            ErrorCode::DuplicateKey,
            ErrorCode::NotFound,
            ErrorCode::RouteNotFound,
            ErrorCode::StoreFailure,
            ErrorCode::Panic,
        ];
        let codes: std::collections::HashSet<i32> = all.iter().map(ErrorCode::code).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_server_error_range() {
        assert!(ErrorCode::StoreFailure.is_server_error());
        assert!(ErrorCode::Panic.is_server_error());
        assert!(!ErrorCode::NotFound.is_server_error());
    }

    #[test]
    fn test_serialized_form_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::DuplicateKey).unwrap();
        assert_eq!(json, "\"DUPLICATE_KEY\"");
    }
}
