//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    handlers::router(ProductService::new(repository))
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoProductRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
