//! Shared application state.

use mongodb::{Client, Database};

/// State handed to the root routes and used to build the domain routers.
///
/// Cloning is cheap: the MongoDB client shares one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
