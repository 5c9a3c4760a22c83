//! Integration tests for MongoProductRepository
//!
//! These need Docker (testcontainers) and are ignored by default:
//! `cargo test -p domain_products -- --ignored`

use axum_helpers::PageRequest;
use domain_products::models::NewProduct;
use domain_products::*;
use test_utils::{TestDataBuilder, TestMongo, assertions::assert_some};

fn new_product(name: &str, price: f64, category: ProductCategory) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: Some(format!("{name} for integration tests")),
        price,
        category,
        in_stock: true,
        quantity: 12,
    }
}

async fn repository(mongo: &TestMongo, test_name: &str) -> MongoProductRepository {
    let builder = TestDataBuilder::from_test_name(test_name);
    let repo = MongoProductRepository::new(&mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();
    repo
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_product() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_product_create").await;

    let created = repo
        .create(new_product("Garden Tool Set", 49.99, ProductCategory::HomeGarden))
        .await
        .unwrap();

    let fetched = assert_some(repo.get_by_id(created.id).await.unwrap(), "product should exist");
    assert_eq!(fetched, created);
    assert_eq!(fetched.stock_status(), StockStatus::InStock);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_filters_match_in_memory_semantics() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_product_filters").await;

    for (name, price, category) in [
        ("Cheap Book", 10.0, ProductCategory::Books),
        ("Garden Hose", 50.0, ProductCategory::HomeGarden),
        ("Board Game", 100.0, ProductCategory::Toys),
        ("Laptop", 999.0, ProductCategory::Electronics),
    ] {
        repo.create(new_product(name, price, category)).await.unwrap();
    }

    let range = ProductFilter {
        min_price: Some(50.0),
        max_price: Some(100.0),
        ..Default::default()
    };
    assert_eq!(repo.count(range.clone()).await.unwrap(), 2);

    let category = ProductFilter {
        category: Some("Home & Garden".into()),
        ..Default::default()
    };
    let found = repo.list(category, PageRequest::default()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Garden Hose");

    let search = ProductFilter {
        search: Some("LAPTOP".into()),
        ..Default::default()
    };
    assert_eq!(repo.count(search).await.unwrap(), 1);

    let newest = repo
        .list(ProductFilter::default(), PageRequest { page: 1, limit: 1 })
        .await
        .unwrap();
    assert_eq!(newest[0].name, "Laptop");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete_product() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_product_update").await;

    let product = repo
        .create(new_product("Desk Lamp", 19.99, ProductCategory::Other))
        .await
        .unwrap();

    let updated = repo
        .update(
            product.id,
            UpdateProduct {
                quantity: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let updated = assert_some(updated, "product should be updated");
    assert_eq!(updated.stock_status(), StockStatus::LowStock);

    let deleted = repo.delete(product.id).await.unwrap();
    assert!(deleted.is_some());
    assert!(repo.get_by_id(product.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_updates_to_different_fields_both_persist() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_product_concurrent_update").await;

    let product = repo
        .create(new_product("Desk Lamp", 19.99, ProductCategory::Other))
        .await
        .unwrap();

    for round in 1..=10 {
        let (quantity, price) = tokio::join!(
            repo.update(
                product.id,
                UpdateProduct {
                    quantity: Some(round),
                    ..Default::default()
                },
            ),
            repo.update(
                product.id,
                UpdateProduct {
                    price: Some(f64::from(round)),
                    ..Default::default()
                },
            ),
        );
        quantity.unwrap();
        price.unwrap();

        let stored = assert_some(repo.get_by_id(product.id).await.unwrap(), "product exists");
        assert_eq!(stored.quantity, round);
        assert_eq!(stored.price, f64::from(round));
    }
}
