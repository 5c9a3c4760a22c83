//! API routes module
//!
//! Wires the domain crates to MongoDB-backed services.

pub mod health;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Domain routes; nested under `/api` by `axum_helpers::create_router`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .nest("/products", products::router(state))
}

/// Top-level routes: health check and welcome
pub fn root_routes(state: &AppState) -> Router {
    health::router(state.clone())
}

/// Creates the indexes both collections rely on.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::init_indexes(state).await?;
    products::init_indexes(state).await?;
    Ok(())
}
