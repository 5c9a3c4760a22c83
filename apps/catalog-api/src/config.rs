use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    /// Reads `APP_ENV`, `HOST`/`PORT` and the `MONGODB_*` variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
        })
    }
}
