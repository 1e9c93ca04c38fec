//! Database connectors shared by the workspace's services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client construction, retry and `ping`
//! - `config` - `core_config::FromEnv` support for connection settings
//!
//! ```ignore
//! use database::mongodb::{connect_from_config_with_retry, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "ecommerce_db");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
