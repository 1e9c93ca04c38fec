//! Application state management

use domain_products::{MongoProductRepository, ProductService};
use mongodb::Client;

use crate::config::Config;

/// Everything built at startup and shared by the server
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    pub products: ProductService<MongoProductRepository>,
}
