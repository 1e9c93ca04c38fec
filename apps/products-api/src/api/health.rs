//! Health check endpoint

use axum::Router;
use domain_products::{handlers, ProductRepository, ProductService};

/// `GET /health`: 200 while the product store answers, 503 otherwise
pub fn router<R: ProductRepository + 'static>(service: &ProductService<R>) -> Router {
    handlers::health_router(service.clone())
}
