//! In-memory ProductRepository for tests and database-less runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{ListQuery, Product, ProductChanges, UpdateOutcome};
use crate::repository::ProductRepository;

/// HashMap-backed store with the same semantics as the MongoDB repository.
///
/// Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails as if the database were unreachable
    pub fn unavailable() -> Self {
        let repository = Self::new();
        repository.set_unavailable(true);
        repository
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    fn check_available(&self) -> ProductResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProductError::Database(
                "connection refused: in-memory store is unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn ping(&self) -> ProductResult<()> {
        self.check_available()
    }

    async fn insert(&self, product: &Product) -> ProductResult<bool> {
        self.check_available()?;

        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(ProductError::Database(format!(
                "duplicate key: id {}",
                product.id
            )));
        }
        products.insert(product.id.clone(), product.clone());
        Ok(true)
    }

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        self.check_available()?;
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn list(&self, query: &ListQuery) -> ProductResult<Vec<Product>> {
        self.check_available()?;

        let products = self.products.read().await;
        let mut matching: Vec<&Product> = products
            .values()
            .filter(|p| query.matches_category(&p.category))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(0);
        Ok(matching.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn update(&self, id: &str, changes: &ProductChanges) -> ProductResult<UpdateOutcome> {
        self.check_available()?;

        let mut products = self.products.write().await;
        let Some(product) = products.get_mut(id) else {
            return Ok(UpdateOutcome::default());
        };

        let before = product.clone();
        changes.apply_to(product);
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(*product != before),
        })
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        self.check_available()?;
        Ok(self.products.write().await.remove(id).is_some())
    }
}
