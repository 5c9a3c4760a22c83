use async_trait::async_trait;
use axum_helpers::PageRequest;
use bson::oid::ObjectId;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, UpdateUser, User, UserFilter};
use crate::repository::UserRepository;

/// In-process user store with the same contract as the MongoDB one.
///
/// Writes hold the lock across the email check and the insert, so the
/// uniqueness guarantee matches the unique index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn email_in_use(users: &HashMap<ObjectId, User>, email: &str, exclude: Option<ObjectId>) -> bool {
        users
            .values()
            .any(|u| u.email == email && Some(u.id) != exclude)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let user = User::new(input);
        user.ensure_valid()?;

        let mut users = self.users.write().await;
        if Self::email_in_use(&users, &user.email, None) {
            return Err(UserError::DuplicateKey(format!(
                "email '{}' already exists",
                user.email
            )));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn list(&self, filter: UserFilter, page: PageRequest) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut matching: Vec<User> = users
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();
        // Newest first; ObjectIds break ties between same-millisecond inserts
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matching
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count(&self, filter: UserFilter) -> UserResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| filter.matches(u)).count() as u64)
    }

    async fn update(&self, id: ObjectId, input: UpdateUser) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(existing) = users.get(&id) else {
            return Ok(None);
        };

        let mut user = existing.clone();
        user.apply_update(input);
        user.ensure_valid()?;

        if Self::email_in_use(&users, &user.email, Some(id)) {
            return Err(UserError::DuplicateKey(format!(
                "email '{}' already exists",
                user.email
            )));
        }

        users.insert(id, user.clone());
        Ok(Some(user))
    }

    async fn delete(&self, id: ObjectId) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id))
    }

    async fn exists_by_email(&self, email: &str, exclude: Option<ObjectId>) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(Self::email_in_use(&users, email, exclude))
    }
}
