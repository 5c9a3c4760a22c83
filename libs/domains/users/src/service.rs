//! User Service - Business logic layer

use axum_helpers::{PageMeta, PageRequest};
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserFilter, UserListQuery};
use crate::repository::UserRepository;

/// User service: request validation, email uniqueness, pagination.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One page of users plus metadata; the page and the total are read
    /// concurrently.
    #[instrument(skip(self))]
    pub async fn list_users(&self, query: UserListQuery) -> UserResult<(Vec<User>, PageMeta)> {
        let page = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref());
        let filter = UserFilter::from_search(query.search);

        let (users, total) = tokio::try_join!(
            self.repository.list(filter.clone(), page),
            self.repository.count(filter),
        )?;

        Ok((users, PageMeta::new(&page, total)))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: ObjectId) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let new_user = input.into_new_user()?;

        if self.repository.exists_by_email(&new_user.email, None).await? {
            return Err(UserError::EmailTaken {
                email: new_user.email,
                on_update: false,
            });
        }

        self.repository.create(new_user).await
    }

    /// Applies the provided fields. A new email must not belong to any other
    /// user; that is checked before the user's existence.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: ObjectId, input: UpdateUser) -> UserResult<User> {
        let input = input.normalized();
        input.validate()?;

        if let Some(ref email) = input.email {
            if self.repository.exists_by_email(email, Some(id)).await? {
                return Err(UserError::EmailTaken {
                    email: email.clone(),
                    on_update: true,
                });
            }
        }

        self.repository
            .update(id, input)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Deletes and returns the user.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: ObjectId) -> UserResult<User> {
        self.repository
            .delete(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
