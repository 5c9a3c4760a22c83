use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    // A missing .env file is fine; real environment variables win
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        environment = %config.environment,
        url = %config.mongodb.redacted_url(),
        "Connecting to MongoDB"
    );

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(database = config.mongodb.database(), "Connected to MongoDB");

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    api::init_indexes(&state).await?;

    let router = create_router::<openapi::ApiDoc>(
        api::routes(&state),
        api::root_routes(&state),
        &state.config.environment,
    )?;

    info!(
        docs = %format!("http://localhost:{}/api-docs", state.config.server.port),
        "Starting Catalog API with graceful shutdown (30s timeout)"
    );

    create_production_app(
        router,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            state.mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
