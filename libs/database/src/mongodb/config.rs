#[cfg(feature = "config")]
use core_config::{env_first, env_parse_or, ConfigError, FromEnv};
use std::time::Duration;

/// Connection string used when no URL variable is set.
pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017";

/// MongoDB connection settings
///
/// Built by hand or loaded from the environment (`config` feature):
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "ecommerce_db")
///     .with_app_name("products-api");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,
    pub database: String,
    /// Reported to the server for its logs
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_pool_size(mut self, max_pool_size: u32, min_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self.min_pool_size = min_pool_size;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_secs)
    }

    /// The URL with any `user:password@` credentials masked, for logging.
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***@{}", &self.url[..scheme_end], &self.url[at + 1..])
            }
            _ => self.url.clone(),
        }
    }

    /// Load from the environment, using `default_database` when no database
    /// variable is set.
    ///
    /// - `MONGODB_URL` | `MONGO_URL` (default: `mongodb://localhost:27017`)
    /// - `MONGODB_DATABASE` | `MONGO_DATABASE` | `DB_NAME`
    /// - `MONGODB_APP_NAME` (optional)
    /// - `MONGODB_MAX_POOL_SIZE` (100), `MONGODB_MIN_POOL_SIZE` (5)
    /// - `MONGODB_CONNECT_TIMEOUT_SECS` (10)
    /// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (30)
    #[cfg(feature = "config")]
    pub fn from_env_with_default_database(default_database: &str) -> Result<Self, ConfigError> {
        let database = env_first(&["MONGODB_DATABASE", "MONGO_DATABASE", "DB_NAME"])
            .unwrap_or_else(|| default_database.to_string());
        Self::load(database)
    }

    #[cfg(feature = "config")]
    fn load(database: String) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            url: env_first(&["MONGODB_URL", "MONGO_URL"])
                .unwrap_or_else(|| DEFAULT_MONGO_URL.to_string()),
            database,
            app_name: env_first(&["MONGODB_APP_NAME"]),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MONGO_URL.to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Like [`MongoConfig::from_env_with_default_database`], but a database
/// variable is required.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let database = env_first(&["MONGODB_DATABASE", "MONGO_DATABASE", "DB_NAME"])
            .ok_or_else(|| {
                ConfigError::MissingEnvVar("MONGODB_DATABASE, MONGO_DATABASE or DB_NAME".to_string())
            })?;
        Self::load(database)
    }
}
