//! Users Domain
//!
//! User records backed by MongoDB: validation, email uniqueness, paginated
//! search and the HTTP endpoints mounted at `/api/users`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, error mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, email uniqueness, pagination
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB / in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Documents, request DTOs, responses
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! # async fn example(db: mongodb::Database) -> Result<(), domain_users::UserError> {
//! use domain_users::{MongoUserRepository, UserService, handlers};
//!
//! let repository = MongoUserRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(UserService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryUserRepository;
pub use models::{CreateUser, UpdateUser, User, UserFilter, UserListQuery, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
