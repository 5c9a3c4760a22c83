//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use axum_helpers::PageRequest;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{DateTime, Document, doc, oid::ObjectId},
    options::{CountOptions, FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::UserResult;
use crate::models::{NewUser, UpdateUser, User, UserFilter};
use crate::repository::UserRepository;

pub const COLLECTION: &str = "users";

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>(COLLECTION),
        }
    }

    /// Creates the unique email index plus the name and recency indexes.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_email_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "firstName": 1, "lastName": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    /// Removes every user. Used by the seeder.
    pub async fn clear(&self) -> UserResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    fn build_filter(filter: &UserFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref search) = filter.search {
            let pattern = regex::escape(search);
            doc.insert(
                "$or",
                vec![
                    doc! { "firstName": { "$regex": &pattern, "$options": "i" } },
                    doc! { "lastName": { "$regex": &pattern, "$options": "i" } },
                    doc! { "email": { "$regex": &pattern, "$options": "i" } },
                ],
            );
        }

        doc
    }

    /// `$set` for the fields present in `update`, taken from the merged
    /// (normalized) document, plus `updatedAt`.
    fn update_document(update: &UpdateUser, merged: &User) -> Document {
        let mut set = doc! { "updatedAt": DateTime::from_chrono(merged.updated_at) };
        if update.first_name.is_some() {
            set.insert("firstName", merged.first_name.as_str());
        }
        if update.last_name.is_some() {
            set.insert("lastName", merged.last_name.as_str());
        }
        if update.email.is_some() {
            set.insert("email", merged.email.as_str());
        }
        if let Some(age) = merged.age.filter(|_| update.age.is_some()) {
            set.insert("age", age);
        }
        if let Some(phone) = merged.phone.as_deref().filter(|_| update.phone.is_some()) {
            set.insert("phone", phone);
        }
        doc! { "$set": set }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let user = User::new(input);
        user.ensure_valid()?;

        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: UserFilter, page: PageRequest) -> UserResult<Vec<User>> {
        let options = FindOptions::builder()
            .skip(page.skip())
            .limit(page.limit as i64)
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();

        let cursor = self
            .collection
            .find(Self::build_filter(&filter))
            .with_options(options)
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;

        Ok(users)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: UserFilter) -> UserResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    /// Validates the merged document, then `$set`s only the provided fields
    /// in one atomic write so concurrent updates to other fields survive.
    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: UpdateUser) -> UserResult<Option<User>> {
        let filter = doc! { "_id": id };
        let Some(mut merged) = self.collection.find_one(filter.clone()).await? else {
            return Ok(None);
        };

        merged.apply_update(input.clone());
        merged.ensure_valid()?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection
            .find_one_and_update(filter, Self::update_document(&input, &merged))
            .with_options(options)
            .await?;

        if updated.is_some() {
            tracing::info!(user_id = %id, "User updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> UserResult<Option<User>> {
        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }).await?;

        if deleted.is_some() {
            tracing::info!(user_id = %id, "User deleted successfully");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str, exclude: Option<ObjectId>) -> UserResult<bool> {
        let mut filter = doc! { "email": email };
        if let Some(id) = exclude {
            filter.insert("_id", doc! { "$ne": id });
        }

        let options = CountOptions::builder().limit(1).build();
        let count = self
            .collection
            .count_documents(filter)
            .with_options(options)
            .await?;
        Ok(count > 0)
    }
}
