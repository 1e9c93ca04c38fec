//! Configuration for Products API

use core_config::{app_info, server::ServerConfig, AppInfo, ConfigError, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 8001;
/// Database used when none of the database variables is set
pub const DEFAULT_DATABASE: &str = "ecommerce_db";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let app = app_info!();
        let mongodb =
            MongoConfig::from_env_with_default_database(DEFAULT_DATABASE)?;

        Ok(Self {
            mongodb: match mongodb.app_name {
                Some(_) => mongodb,
                None => mongodb.with_app_name(app.name),
            },
            server: ServerConfig::from_env_with_port(DEFAULT_PORT)?,
            environment: Environment::from_env(),
            app,
        })
    }
}
