//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{ListQuery, Product, ProductChanges, UpdateOutcome};
use crate::repository::ProductRepository;

/// Collection used by [`MongoProductRepository::new`]
pub const PRODUCTS_COLLECTION: &str = "products";

/// Stored shape of a [`Product`], with BSON dates.
///
/// The server-assigned `_id` is not part of the model and is skipped when
/// reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProductDocument {
    id: String,
    name: String,
    description: String,
    price: f64,
    category: String,
    stock_quantity: i64,
    #[serde(default)]
    image_url: Option<String>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_bson_date(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_date(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(value.to_system_time())
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            stock_quantity: product.stock_quantity,
            image_url: product.image_url.clone(),
            created_at: to_bson_date(product.created_at),
            updated_at: to_bson_date(product.updated_at),
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            description: doc.description,
            price: doc.price,
            category: doc.category,
            stock_quantity: doc.stock_quantity,
            image_url: doc.image_url,
            created_at: from_bson_date(doc.created_at),
            updated_at: from_bson_date(doc.updated_at),
        }
    }
}

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    database: Database,
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            database: db.clone(),
            collection: db.collection::<ProductDocument>(collection_name),
        }
    }

    /// Create the unique `id` index and the listing indexes.
    ///
    /// Safe to call on every start; existing indexes are left alone.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_id_unique".to_string())
                        .build(),
                )
                .build(),
            // Default listing order
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Name of the backing collection
    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    fn build_filter(query: &ListQuery) -> Document {
        let mut filter = doc! {};

        // Literal substring: the user's text is never interpreted as a pattern
        if let Some(ref category) = query.category {
            filter.insert(
                "category",
                doc! { "$regex": regex::escape(category), "$options": "i" },
            );
        }

        filter
    }

    fn build_set(changes: &ProductChanges) -> Document {
        let mut set = doc! { "updated_at": to_bson_date(changes.updated_at) };

        if let Some(ref name) = changes.name {
            set.insert("name", name);
        }
        if let Some(ref description) = changes.description {
            set.insert("description", description);
        }
        if let Some(price) = changes.price {
            set.insert("price", price);
        }
        if let Some(ref category) = changes.category {
            set.insert("category", category);
        }
        if let Some(stock_quantity) = changes.stock_quantity {
            set.insert("stock_quantity", stock_quantity);
        }
        if let Some(ref image_url) = changes.image_url {
            set.insert("image_url", image_url);
        }

        set
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn ping(&self) -> ProductResult<()> {
        database::mongodb::ping(&self.database).await?;
        Ok(())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: &Product) -> ProductResult<bool> {
        let result = self
            .collection
            .insert_one(ProductDocument::from(product))
            .await?;
        Ok(result.inserted_id != Bson::Null)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let document = self.collection.find_one(doc! { "id": id }).await?;
        Ok(document.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "id": 1 })
            .skip(query.skip)
            .limit(query.limit)
            .build();

        let cursor = self
            .collection
            .find(Self::build_filter(query))
            .with_options(options)
            .await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &ProductChanges) -> ProductResult<UpdateOutcome> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": Self::build_set(changes) })
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
