//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Request validation failed",
    content_type = "application/json",
    example = json!({
        "error": "Validation failed",
        "details": [{
            "field": "email",
            "message": "Please provide a valid email address",
            "value": "not-an-email"
        }]
    })
)]
pub struct ValidationFailedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Malformed identifier",
    content_type = "application/json",
    example = json!({
        "error": "Validation failed",
        "details": [{ "field": "id", "message": "Invalid ID format", "value": "123" }]
    })
)]
pub struct InvalidIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Duplicate email address",
    content_type = "application/json",
    example = json!({
        "error": "Email already exists",
        "message": "A user with this email address already exists"
    })
)]
pub struct DuplicateResponse(pub ErrorResponse);

/// Every 400 an update can produce. The email example applies to users only.
#[derive(ToResponse)]
#[response(
    description = "Bad request",
    content_type = "application/json",
    examples(
        ("Validation failed" = (value = json!({
            "error": "Validation failed",
            "details": [{ "field": "age", "message": "Age must be a number between 0 and 120", "value": 150 }]
        }))),
        ("Invalid ID" = (value = json!({
            "error": "Validation failed",
            "details": [{ "field": "id", "message": "Invalid ID format", "value": "123" }]
        }))),
        ("Invalid body" = (value = json!({
            "error": "Invalid request body",
            "message": "Failed to deserialize the JSON body into the target type"
        }))),
        ("Email taken (users)" = (value = json!({
            "error": "Email already exists",
            "message": "Another user with this email address already exists"
        })))
    )
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "User not found",
        "message": "No user found with ID: 64b7f0c2a1b2c3d4e5f60718"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "Failed to fetch users",
        "message": "Internal server error"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
