//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "E-commerce API",
        description = "Product catalogue backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8001", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api", api = domain_products::HealthApiDoc)
    )
)]
pub struct ApiDoc;
