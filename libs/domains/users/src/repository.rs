use async_trait::async_trait;
use axum_helpers::PageRequest;
use bson::oid::ObjectId;

use crate::error::UserResult;
use crate::models::{NewUser, UpdateUser, User, UserFilter};

/// Persistence for users.
///
/// Implementations own identifiers and timestamps, re-validate documents
/// before writing, and enforce email uniqueness, reporting violations as
/// [`UserError::DuplicateKey`](crate::error::UserError::DuplicateKey).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: NewUser) -> UserResult<User>;

    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>>;

    /// Matching users, newest first
    async fn list(&self, filter: UserFilter, page: PageRequest) -> UserResult<Vec<User>>;

    async fn count(&self, filter: UserFilter) -> UserResult<u64>;

    /// Applies `input` to the stored user; `None` if it does not exist.
    async fn update(&self, id: ObjectId, input: UpdateUser) -> UserResult<Option<User>>;

    /// Removes and returns the user; `None` if it does not exist.
    async fn delete(&self, id: ObjectId) -> UserResult<Option<User>>;

    /// Whether `email` (already normalized) is used by a user other than `exclude`.
    async fn exists_by_email(&self, email: &str, exclude: Option<ObjectId>) -> UserResult<bool>;
}
