//! Product Service - Business logic layer

use axum_helpers::{PageMeta, PageRequest};
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, ProductListQuery, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Validates requests, turns list queries into filters and pages, and maps
/// missing documents to [`ProductError::NotFound`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One page of products plus metadata; the page and the total are read
    /// concurrently.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> ProductResult<(Vec<Product>, PageMeta)> {
        let filter = ProductFilter::from_query(&query)?;
        let page = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref());

        let (products, total) = tokio::try_join!(
            self.repository.list(filter.clone(), page),
            self.repository.count(filter),
        )?;

        Ok((products, PageMeta::new(&page, total)))
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(product_name = ?input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let new_product = input.into_new_product()?;
        self.repository.create(new_product).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Deletes and returns the product.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
