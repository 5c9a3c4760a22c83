#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or};

const DEFAULT_DATABASE: &str = "catalog";

/// MongoDB connection settings.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog")
///     .with_app_name("catalog-api");
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    pub database: String,

    /// Shown in server-side logs and `currentOp`
    pub app_name: Option<String>,

    pub max_pool_size: u32,

    pub min_pool_size: u32,

    pub connect_timeout_secs: u64,

    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Database defaults to the one named in the URL path, or "catalog".
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let database = database_from_url(&url).unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        Self::with_database(url, database)
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    pub fn with_pool_size(mut self, max_pool_size: u32, min_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self.min_pool_size = min_pool_size;
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// The URL with any `user:password@` section masked, for logging.
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***@{}", &self.url[..scheme_end], &self.url[at + 1..])
            }
            _ => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::with_database("mongodb://localhost:27017", DEFAULT_DATABASE)
    }
}

/// Extracts the default database from a connection string path, if any.
fn database_from_url(url: &str) -> Option<String> {
    let after_scheme = url.split_once("://").map(|(_, rest)| rest)?;
    let (_, path) = after_scheme.split_once('/')?;
    let name = path.split('?').next().unwrap_or_default();
    (!name.is_empty()).then(|| name.to_string())
}

/// Environment variables:
/// - `MONGODB_URI`, `MONGODB_URL` or `MONGO_URL` (required, first one set wins)
/// - `MONGODB_DATABASE` (optional) - falls back to the URL path, then "catalog"
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = ["MONGODB_URI", "MONGODB_URL", "MONGO_URL"]
            .iter()
            .find_map(|key| std::env::var(key).ok())
            .ok_or_else(|| ConfigError::MissingEnvVar("MONGODB_URI".to_string()))?;

        let mut config = match std::env::var("MONGODB_DATABASE") {
            Ok(database) => Self::with_database(url, database),
            Err(_) => Self::new(url),
        };

        config.app_name = std::env::var("MONGODB_APP_NAME").ok();
        config.max_pool_size = env_parse_or("MONGODB_MAX_POOL_SIZE", config.max_pool_size)?;
        config.min_pool_size = env_parse_or("MONGODB_MIN_POOL_SIZE", config.min_pool_size)?;
        config.connect_timeout_secs =
            env_parse_or("MONGODB_CONNECT_TIMEOUT_SECS", config.connect_timeout_secs)?;
        config.server_selection_timeout_secs = env_parse_or(
            "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
            config.server_selection_timeout_secs,
        )?;

        Ok(config)
    }
}
