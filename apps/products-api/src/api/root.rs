//! Service metadata served at `/`

use axum::Router;
use axum_helpers::server::{index_router, ServiceIndex, DOCS_PATH};

pub fn index() -> ServiceIndex {
    ServiceIndex::new("E-commerce API", env!("CARGO_PKG_VERSION"))
        .documentation(DOCS_PATH)
        .endpoint("products", "/api/products")
        .endpoint("health", "/api/health")
}

pub fn router() -> Router {
    index_router(index())
}
