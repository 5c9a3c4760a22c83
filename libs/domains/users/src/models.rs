use axum_helpers::{PageMeta, input};
use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{UserError, UserResult};

/// Letters and whitespace only
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());

/// Optional leading `+`, then at least 10 digits, spaces, dashes or parentheses
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]{10,}$").unwrap());

/// Current time at the store's millisecond precision.
pub(crate) fn now() -> DateTime<Utc> {
    bson::DateTime::now().to_chrono()
}

/// User document as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    /// Normalized (trimmed, lower-case); unique across users
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a new document with a fresh id and matching timestamps.
    pub fn new(new_user: NewUser) -> Self {
        let now = now();
        Self {
            id: ObjectId::new(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: input::normalize_email(&new_user.email),
            age: new_user.age,
            phone: new_user.phone,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies the provided fields and bumps `updated_at`.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = input::normalize_email(&email);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        self.updated_at = now().max(self.created_at);
    }

    /// Re-checks every field rule against the document about to be written.
    pub fn ensure_valid(&self) -> UserResult<()> {
        UpdateUser::from(self).validate().map_err(UserError::from)
    }
}

/// Request body for creating a user
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(
        required(message = "First name must be between 2 and 50 characters"),
        length(min = 2, max = 50, message = "First name must be between 2 and 50 characters"),
        regex(path = *NAME_PATTERN, message = "First name can only contain letters and spaces")
    )]
    #[schema(example = "John")]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(
        required(message = "Last name must be between 2 and 50 characters"),
        length(min = 2, max = 50, message = "Last name must be between 2 and 50 characters"),
        regex(path = *NAME_PATTERN, message = "Last name can only contain letters and spaces")
    )]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "input::email")]
    #[validate(
        required(message = "Please provide a valid email address"),
        email(message = "Please provide a valid email address")
    )]
    #[schema(example = "john.doe@example.com")]
    pub email: Option<String>,

    #[validate(range(min = 0, max = 120, message = "Age must be a number between 0 and 120"))]
    #[schema(example = 30)]
    pub age: Option<i32>,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(regex(path = *PHONE_PATTERN, message = "Please provide a valid phone number"))]
    #[schema(example = "+1-555-0123")]
    pub phone: Option<String>,
}

impl CreateUser {
    /// Trims the text fields and normalizes the email.
    pub fn normalized(self) -> Self {
        Self {
            first_name: input::trim(self.first_name),
            last_name: input::trim(self.last_name),
            email: self.email.map(|email| input::normalize_email(&email)),
            age: self.age,
            phone: input::trim(self.phone),
        }
    }

    /// Normalizes, validates and unwraps the required fields.
    pub fn into_new_user(self) -> UserResult<NewUser> {
        let request = self.normalized();
        request.validate()?;
        match (request.first_name, request.last_name, request.email) {
            (Some(first_name), Some(last_name), Some(email)) => Ok(NewUser {
                first_name,
                last_name,
                email,
                age: request.age,
                phone: request.phone,
            }),
            _ => Err(UserError::Validation(Vec::new())),
        }
    }
}

/// A validated create request, ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<i32>,
    pub phone: Option<String>,
}

/// Request body for updating a user; only provided fields change
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(
        length(min = 2, max = 50, message = "First name must be between 2 and 50 characters"),
        regex(path = *NAME_PATTERN, message = "First name can only contain letters and spaces")
    )]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(
        length(min = 2, max = 50, message = "Last name must be between 2 and 50 characters"),
        regex(path = *NAME_PATTERN, message = "Last name can only contain letters and spaces")
    )]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "input::email")]
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: Option<String>,

    #[validate(range(min = 0, max = 120, message = "Age must be a number between 0 and 120"))]
    pub age: Option<i32>,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(regex(path = *PHONE_PATTERN, message = "Please provide a valid phone number"))]
    pub phone: Option<String>,
}

impl UpdateUser {
    /// Trims the provided text fields and normalizes the email.
    pub fn normalized(self) -> Self {
        Self {
            first_name: input::trim(self.first_name),
            last_name: input::trim(self.last_name),
            email: self.email.map(|email| input::normalize_email(&email)),
            age: self.age,
            phone: input::trim(self.phone),
        }
    }
}

impl From<&User> for UpdateUser {
    fn from(user: &User) -> Self {
        Self {
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            email: Some(user.email.clone()),
            age: user.age,
            phone: user.phone.clone(),
        }
    }
}

/// Raw list query; numeric values are parsed leniently by the service
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Page number (default 1)
    #[param(value_type = Option<u64>, minimum = 1)]
    pub page: Option<String>,
    /// Users per page (default 10, max 100)
    #[param(value_type = Option<u64>, minimum = 1, maximum = 100)]
    pub limit: Option<String>,
    /// Case-insensitive match on first name, last name or email
    pub search: Option<String>,
}

/// Store-level user filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    /// Literal, case-insensitive substring
    pub search: Option<String>,
}

impl UserFilter {
    /// Empty search terms apply no filter.
    pub fn from_search(search: Option<String>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()),
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let term = term.to_lowercase();
        [&user.first_name, &user.last_name, &user.email]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    #[schema(example = "64b7f0c2a1b2c3d4e5f60718")]
    pub object_id: String,
    #[schema(example = "64b7f0c2a1b2c3d4e5f60718")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// `"{firstName} {lastName}"`
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let id = user.id.to_hex();
        Self {
            object_id: id.clone(),
            id,
            full_name: user.full_name(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            age: user.age,
            phone: user.phone,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_users: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PageMeta> for UserPagination {
    fn from(meta: PageMeta) -> Self {
        Self {
            current_page: meta.current_page,
            total_pages: meta.total_pages,
            total_users: meta.total_count,
            has_next: meta.has_next,
            has_prev: meta.has_prev,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub pagination: UserPagination,
}

impl UserListResponse {
    pub fn new(users: Vec<User>, meta: PageMeta) -> Self {
        Self {
            users: users.into_iter().map(UserResponse::from).collect(),
            pagination: meta.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedUserResponse {
    #[schema(example = "User deleted successfully")]
    pub message: String,
    pub deleted_user: UserResponse,
}

impl From<User> for DeletedUserResponse {
    fn from(user: User) -> Self {
        Self {
            message: "User deleted successfully".to_string(),
            deleted_user: user.into(),
        }
    }
}
