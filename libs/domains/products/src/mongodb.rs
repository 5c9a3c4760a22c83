//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use axum_helpers::PageRequest;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{DateTime, Document, doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

pub const COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Product>(COLLECTION),
        }
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
        }
    }

    /// Initialize indexes for listing, filtering and search
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = |keys: Document, name: &str| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build()
        };

        let indexes = vec![
            index(doc! { "name": 1 }, "idx_name"),
            index(doc! { "category": 1 }, "idx_category"),
            index(doc! { "price": 1 }, "idx_price"),
            index(doc! { "createdAt": -1 }, "idx_created_at"),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Removes every product. Used by the seeder.
    pub async fn clear(&self) -> ProductResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category) = filter.category {
            doc.insert("category", category.as_str());
        }

        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut price = doc! {};
            if let Some(min) = filter.min_price {
                price.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                price.insert("$lte", max);
            }
            doc.insert("price", price);
        }

        if let Some(in_stock) = filter.in_stock {
            doc.insert("inStock", in_stock);
        }

        if let Some(ref search) = filter.search {
            let pattern = regex::escape(search);
            doc.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": &pattern, "$options": "i" } },
                    doc! { "description": { "$regex": &pattern, "$options": "i" } },
                ],
            );
        }

        doc
    }

    /// `$set` for the fields present in `update`, taken from the merged
    /// document, plus `updatedAt`.
    fn update_document(update: &UpdateProduct, merged: &Product) -> Document {
        let mut set = doc! { "updatedAt": DateTime::from_chrono(merged.updated_at) };
        if update.name.is_some() {
            set.insert("name", merged.name.as_str());
        }
        if update.description.is_some() {
            if let Some(description) = merged.description.as_deref() {
                set.insert("description", description);
            }
        }
        if update.price.is_some() {
            set.insert("price", merged.price);
        }
        if update.category.is_some() {
            set.insert("category", merged.category.to_string());
        }
        if update.in_stock.is_some() {
            set.insert("inStock", merged.in_stock);
        }
        if update.quantity.is_some() {
            set.insert("quantity", merged.quantity);
        }
        doc! { "$set": set }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        product.ensure_valid()?;

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter, page: PageRequest) -> ProductResult<Vec<Product>> {
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
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    /// Validates the merged document, then `$set`s only the provided fields
    /// in one atomic write.
    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<Option<Product>> {
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
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }).await?;

        if deleted.is_some() {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductCategory;

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoProductRepository::build_filter(&ProductFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_price_range() {
        let filter = ProductFilter {
            min_price: Some(50.0),
            max_price: Some(100.0),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);

        assert_eq!(
            doc,
            doc! { "price": { "$gte": 50.0, "$lte": 100.0 } }
        );
    }

    #[test]
    fn test_build_filter_single_bound() {
        let filter = ProductFilter {
            max_price: Some(20.0),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);

        assert_eq!(doc, doc! { "price": { "$lte": 20.0 } });
    }

    #[test]
    fn test_build_filter_all_fields() {
        let filter = ProductFilter {
            category: Some("Home & Garden".into()),
            in_stock: Some(false),
            search: Some("tool (5)".into()),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);

        assert_eq!(doc.get_str("category").unwrap(), "Home & Garden");
        assert!(!doc.get_bool("inStock").unwrap());

        let clauses = doc.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);
        let pattern = clauses[1]
            .as_document()
            .unwrap()
            .get_document("description")
            .unwrap()
            .get_str("$regex")
            .unwrap();
        assert_eq!(pattern, r"tool \(5\)");
    }

    fn stored_lamp() -> Product {
        Product::new(NewProduct {
            name: "Desk Lamp".into(),
            description: None,
            price: 19.99,
            category: ProductCategory::HomeGarden,
            in_stock: true,
            quantity: 0,
        })
    }

    #[test]
    fn test_update_document_sets_only_provided_fields() {
        let update = UpdateProduct {
            quantity: Some(5),
            ..Default::default()
        };
        let mut merged = stored_lamp();
        merged.apply_update(update.clone());

        let doc = MongoProductRepository::update_document(&update, &merged);
        let set = doc.get_document("$set").unwrap();

        let mut keys: Vec<_> = set.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["quantity", "updatedAt"]);
        assert_eq!(set.get_i32("quantity").unwrap(), 5);
    }

    #[test]
    fn test_update_document_writes_category_as_stored() {
        let update = UpdateProduct {
            category: Some("Electronics".into()),
            price: Some(9.0),
            ..Default::default()
        };
        let mut merged = stored_lamp();
        merged.apply_update(update.clone());

        let doc = MongoProductRepository::update_document(&update, &merged);
        let set = doc.get_document("$set").unwrap();

        assert_eq!(set.get_str("category").unwrap(), "Electronics");
        assert_eq!(set.get_f64("price").unwrap(), 9.0);
        assert!(!set.contains_key("name"));
    }
}
