//! Router assembly, the service index and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, index_router, ServiceIndex};
//!
//! let index = ServiceIndex::new("Shop API", env!("CARGO_PKG_VERSION"))
//!     .endpoint("health", "/api/health");
//! let router = create_router::<ApiDoc>(api_routes, index_router(index))?;
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod index;
pub mod shutdown;

pub use app::{DOCS_PATH, OPENAPI_PATH, REDOC_PATH, create_production_app, create_router};
pub use index::{ServiceIndex, index_router};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
