//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    next_timestamp, now_millis, CreateProduct, HealthStatus, ListQuery, PageQuery, Product,
    ProductFilter, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Validates input, stamps ids and timestamps, and checks that the store
/// behaved consistently. Holds nothing but the repository, so clones are cheap.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Ping the store.
    #[instrument(skip(self))]
    pub async fn health(&self) -> ProductResult<HealthStatus> {
        match self.repository.ping().await {
            Ok(()) => Ok(HealthStatus::healthy()),
            Err(e) => {
                tracing::warn!(error = %e, "Product store health check failed");
                Err(ProductError::ServiceUnavailable(format!(
                    "Database unavailable: {e}"
                )))
            }
        }
    }

    /// Create a new product and return it as stored.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        let product = Product::new(input, now_millis());
        if !self.repository.insert(&product).await? {
            return Err(ProductError::Internal(
                "Product insert was not acknowledged".to_string(),
            ));
        }

        let stored = self
            .repository
            .find_by_id(&product.id)
            .await?
            .ok_or_else(|| {
                ProductError::Internal(format!(
                    "Product {} missing after insert",
                    product.id
                ))
            })?;

        tracing::info!(product_id = %stored.id, "Product created successfully");
        Ok(stored)
    }

    /// List products, newest first.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        filter.validate()?;
        self.repository.list(&ListQuery::from_filter(filter)).await
    }

    /// List products whose category contains `category`, ignoring case.
    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        category: &str,
        page: PageQuery,
    ) -> ProductResult<Vec<Product>> {
        self.list_products(page.with_category(category)).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Apply the fields present in `input`.
    ///
    /// An update with no fields returns the product unchanged, including its
    /// `updated_at`.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        let existing = self.get_product(id).await?;
        if input.is_empty() {
            return Ok(existing);
        }

        let changes = input.into_changes(next_timestamp(existing.updated_at));
        let outcome = self.repository.update(id, &changes).await?;
        if outcome.matched == 0 {
            return Err(ProductError::Internal(format!(
                "Product {id} disappeared during update"
            )));
        }

        let updated = self.repository.find_by_id(id).await?.ok_or_else(|| {
            ProductError::Internal(format!("Product {id} missing after update"))
        })?;

        tracing::info!(product_id = %id, modified = outcome.modified, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
