//! Users API routes

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    handlers::router(UserService::new(repository))
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoUserRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
