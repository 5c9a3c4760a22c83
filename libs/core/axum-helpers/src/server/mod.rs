//! Router assembly and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, root_routes, &environment)?;
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod shutdown;

pub use app::{OPENAPI_JSON_PATH, create_production_app, create_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
