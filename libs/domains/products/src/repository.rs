use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{ListQuery, Product, ProductChanges, UpdateOutcome};

/// Document store seam for products.
///
/// Implementations report store failures as errors and leave every business
/// decision (validation, not-found handling, consistency checks) to
/// [`crate::ProductService`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Round-trip to the store
    async fn ping(&self) -> ProductResult<()>;

    /// Persist a new product. Returns whether the store acknowledged the write.
    async fn insert(&self, product: &Product) -> ProductResult<bool>;

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Products matching `query`, newest `created_at` first
    async fn list(&self, query: &ListQuery) -> ProductResult<Vec<Product>>;

    /// Apply `changes` atomically to the product with `id`
    async fn update(&self, id: &str, changes: &ProductChanges) -> ProductResult<UpdateOutcome>;

    /// Returns whether a product was removed
    async fn delete(&self, id: &str) -> ProductResult<bool>;
}
