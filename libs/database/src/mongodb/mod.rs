//! MongoDB connection management and health checks.

mod config;
mod connector;
mod error;
mod health;

pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use error::{DUPLICATE_KEY_CODE, MongoError, is_duplicate_key};
pub use health::{HealthStatus, check_health, check_health_detailed};

pub use mongodb::{Client, Collection, Database};
