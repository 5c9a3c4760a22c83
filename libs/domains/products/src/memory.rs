use async_trait::async_trait;
use axum_helpers::PageRequest;
use bson::oid::ObjectId;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// In-process product store with the same contract as the MongoDB one
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ObjectId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        product.ensure_valid()?;

        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter, page: PageRequest) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
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

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn update(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(existing) = products.get(&id) else {
            return Ok(None);
        };

        let mut product = existing.clone();
        product.apply_update(input);
        product.ensure_valid()?;

        products.insert(id, product.clone());
        Ok(Some(product))
    }

    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id))
    }
}
