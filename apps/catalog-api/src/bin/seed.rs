//! Resets the catalog to a small sample data set.
//!
//! Uses the same environment as the API (`MONGODB_URI`, `MONGODB_DATABASE`, ...):
//!
//! ```sh
//! cargo run -p catalog_api --bin seed
//! ```

use core_config::{Environment, FromEnv, tracing::{init_tracing, install_color_eyre}};
use database::mongodb::{MongoConfig, connect_from_config_with_retry};
use domain_products::{
    MongoProductRepository, ProductCategory, ProductRepository, models::NewProduct,
};
use domain_users::{MongoUserRepository, UserRepository, models::NewUser};
use tracing::info;

fn sample_users() -> Vec<NewUser> {
    [
        ("John", "Doe", "john.doe@example.com", 30, "+1-555-123-4567"),
        ("Jane", "Smith", "jane.smith@example.com", 28, "+1-555-987-6543"),
        ("Mike", "Johnson", "mike.johnson@example.com", 35, "+1-555-456-7890"),
        ("Sarah", "Williams", "sarah.williams@example.com", 26, "+1-555-321-0987"),
        ("David", "Brown", "david.brown@example.com", 42, "+1-555-654-3210"),
    ]
    .into_iter()
    .map(|(first_name, last_name, email, age, phone)| NewUser {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        age: Some(age),
        phone: Some(phone.to_string()),
    })
    .collect()
}

fn sample_products() -> Vec<NewProduct> {
    use ProductCategory::*;

    [
        ("iPhone 14 Pro", "Latest iPhone with Pro camera system and A16 Bionic chip", 999.99, Electronics, true, 50),
        ("MacBook Air M2", "Lightweight laptop with M2 chip and all-day battery life", 1199.99, Electronics, true, 30),
        ("Nike Air Max", "Comfortable running shoes with air cushioning", 129.99, Sports, true, 75),
        ("The Great Gatsby", "Classic American novel by F. Scott Fitzgerald", 12.99, Books, true, 100),
        ("Levi's 501 Jeans", "Classic straight-leg jeans in vintage blue", 79.99, Clothing, true, 60),
        ("Garden Tool Set", "Complete 5-piece gardening tool set with carrying case", 49.99, HomeGarden, true, 25),
        ("LEGO Architecture Set", "Build famous landmarks with this detailed LEGO set", 89.99, Toys, false, 0),
        ("Organic Coffee Beans", "Premium organic coffee beans from Colombia", 24.99, Food, true, 40),
    ]
    .into_iter()
    .map(|(name, description, price, category, in_stock, quantity)| NewProduct {
        name: name.to_string(),
        description: Some(description.to_string()),
        price,
        category,
        in_stock,
        quantity,
    })
    .collect()
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    let _ = dotenvy::dotenv();

    init_tracing(&Environment::from_env());

    let config = MongoConfig::from_env()?;
    let client = connect_from_config_with_retry(&config, None).await?;
    let db = client.database(config.database());
    info!(database = config.database(), "Connected to MongoDB");

    let users = MongoUserRepository::new(&db);
    let products = MongoProductRepository::new(&db);
    users.init_indexes().await?;
    products.init_indexes().await?;

    let removed_users = users.clear().await?;
    let removed_products = products.clear().await?;
    info!(removed_users, removed_products, "Cleared existing data");

    let mut user_count = 0;
    for user in sample_users() {
        let created = users.create(user).await?;
        info!(user_id = %created.id, name = %created.full_name(), "Seeded user");
        user_count += 1;
    }

    let mut product_count = 0;
    for product in sample_products() {
        let created = products.create(product).await?;
        info!(
            product_id = %created.id,
            name = %created.name,
            stock_status = %created.stock_status(),
            "Seeded product"
        );
        product_count += 1;
    }

    info!(users = user_count, products = product_count, "Database seeded successfully");

    client.shutdown().await;
    Ok(())
}
