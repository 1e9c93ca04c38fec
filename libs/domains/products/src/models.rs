use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Page size used when the request does not give one
pub const DEFAULT_LIST_LIMIT: i64 = 50;
/// Larger `limit` values are silently capped to this
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// UUID v4, assigned at creation
    #[schema(example = "5b0c1f0e-2a53-4c8f-9d43-0f6f6c3e8a11")]
    pub id: String,
    #[schema(example = "Mug")]
    pub name: String,
    #[schema(example = "Ceramic")]
    pub description: String,
    #[schema(example = 9.5)]
    pub price: f64,
    #[schema(example = "Kitchen")]
    pub category: String,
    #[schema(example = 3)]
    pub stock_quantity: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product from validated input, stamped with `now`.
    pub fn new(input: CreateProduct, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            stock_quantity: input.stock_quantity,
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 1000, message = "must be between 1 and 1000 characters"))]
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: f64,
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub category: String,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub stock_quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// DTO for a partial update.
///
/// Omitted fields and explicit `null`s are both left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 1000, message = "must be between 1 and 1000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub stock_quantity: Option<i64>,
    pub image_url: Option<String>,
}

impl UpdateProduct {
    /// `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.stock_quantity.is_none()
            && self.image_url.is_none()
    }

    /// The field assignments to persist, stamped with `updated_at`.
    pub fn into_changes(self, updated_at: DateTime<Utc>) -> ProductChanges {
        ProductChanges {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock_quantity: self.stock_quantity,
            image_url: self.image_url,
            updated_at,
        }
    }
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("range").with_message("must be greater than 0".into()))
    }
}

/// Query parameters for `GET /products`
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Number of products to skip
    #[serde(default)]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    #[param(minimum = 0, default = 0)]
    pub skip: i64,
    /// Page size, capped at 1000
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "must be greater than or equal to 1"))]
    #[param(minimum = 1, default = 50)]
    pub limit: i64,
    /// Case-insensitive substring of the category; empty means no filter
    pub category: Option<String>,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
            category: None,
        }
    }
}

/// Paging for `GET /products/category/{category}`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    #[serde(default)]
    #[param(minimum = 0, default = 0)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[param(minimum = 1, default = 50)]
    pub limit: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl PageQuery {
    pub fn with_category(self, category: impl Into<String>) -> ProductFilter {
        ProductFilter {
            skip: self.skip,
            limit: self.limit,
            category: Some(category.into()),
        }
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

/// A normalized listing request as handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Non-empty when present
    pub category: Option<String>,
    pub skip: u64,
    /// Between 1 and [`MAX_LIST_LIMIT`]
    pub limit: i64,
}

impl ListQuery {
    /// Normalize an already validated filter.
    pub fn from_filter(filter: ProductFilter) -> Self {
        Self {
            category: filter.category.filter(|c| !c.is_empty()),
            skip: u64::try_from(filter.skip).unwrap_or(0),
            limit: filter.limit.clamp(1, MAX_LIST_LIMIT),
        }
    }

    /// Case-insensitive substring match against the category filter.
    pub fn matches_category(&self, category: &str) -> bool {
        match &self.category {
            Some(needle) => category.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

/// Field assignments applied by a single update
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock_quantity: Option<i64>,
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProductChanges {
    /// Apply the assignments to `product` in place.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(stock_quantity) = self.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        if let Some(image_url) = &self.image_url {
            product.image_url = Some(image_url.clone());
        }
        product.updated_at = self.updated_at;
    }
}

/// Result of applying [`ProductChanges`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Current time at the store's millisecond resolution.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A millisecond timestamp strictly after `previous`.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now_millis();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

/// Health of the product store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "connected")]
    pub database: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            database: "connected".to_string(),
        }
    }
}
