//! Products Domain
//!
//! Product catalog backed by MongoDB: validation, filtered and paginated
//! listing, derived stock status and the HTTP endpoints mounted at
//! `/api/products`.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example(db: mongodb::Database) -> Result<(), domain_products::ProductError> {
//! use domain_products::{MongoProductRepository, ProductService, handlers};
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(ProductService::new(repository));
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

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductRepository;
pub use models::{
    CreateProduct, Product, ProductCategory, ProductFilter, ProductListQuery, ProductResponse,
    StockStatus, UpdateProduct,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
