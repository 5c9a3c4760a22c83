//! MongoDB connectivity for the catalog services.
//!
//! # Features
//!
//! - `mongodb` (default) - client construction, retrying connect, health checks
//! - `config` - `core_config::FromEnv` for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::new("mongodb://localhost:27017/catalog");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_with_backoff};
