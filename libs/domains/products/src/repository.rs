use async_trait::async_trait;
use axum_helpers::PageRequest;
use bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductFilter, UpdateProduct};

/// Persistence for products.
///
/// Implementations own identifiers and timestamps and re-validate documents
/// before writing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Matching products, newest first
    async fn list(&self, filter: ProductFilter, page: PageRequest) -> ProductResult<Vec<Product>>;

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;

    /// Applies `input` to the stored product; `None` if it does not exist.
    async fn update(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Removes and returns the product; `None` if it does not exist.
    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>>;
}
