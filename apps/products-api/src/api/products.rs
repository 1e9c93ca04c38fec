//! Products API routes

use axum::Router;
use domain_products::{handlers, ProductRepository, ProductService};

/// Create products router
pub fn router<R: ProductRepository + 'static>(service: &ProductService<R>) -> Router {
    handlers::router(service.clone())
}
