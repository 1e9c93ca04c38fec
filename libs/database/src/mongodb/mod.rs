//! MongoDB connection management and the `ping` probe.

mod config;
mod connector;
mod health;

pub use config::{MongoConfig, DEFAULT_MONGO_URL};
pub use connector::{connect, connect_from_config, connect_from_config_with_retry};
pub use health::ping;

pub use mongodb::{Client, Collection, Database};
