use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Sellable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub discount: f64,
    /// Units on hand; never negative
    pub stock: i32,
    pub category_id: Option<Uuid>,
    /// Image URLs
    pub images: Vec<String>,
    /// Units sold through placed orders
    pub no_of_sell: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            discount: input.discount,
            stock: input.stock,
            category_id: input.category_id,
            images: input.images,
            no_of_sell: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(discount) = update.discount {
            self.discount = discount;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        self.updated_at = Utc::now();
    }

    /// Unit price after discount
    pub fn effective_price(&self) -> f64 {
        self.price - self.discount
    }
}

/// Product with the mean of its review ratings, 0 when unreviewed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductWithRating {
    #[serde(flatten)]
    pub product: Product,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_discount"))]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub discount: f64,
    #[validate(range(min = 0))]
    pub stock: i32,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub images: Vec<String>,
}

fn validate_create_discount(input: &CreateProduct) -> Result<(), ValidationError> {
    if input.discount > input.price {
        return Err(ValidationError::new("discount_exceeds_price"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub discount: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub category_id: Option<Uuid>,
    pub images: Option<Vec<String>>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductSortField {
    Name,
    Price,
    #[default]
    #[serde(alias = "createdAt")]
    CreatedAt,
    Stock,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Asc,
    #[default]
    #[serde(alias = "desc")]
    Desc,
}

/// Query parameters for the product list
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    #[serde(alias = "categoryId")]
    pub category_id: Option<Uuid>,
    /// Case-insensitive match on name or description
    pub search: Option<String>,
    #[serde(alias = "minPrice")]
    #[validate(range(min = 0.0))]
    pub min_price: Option<f64>,
    #[serde(alias = "maxPrice")]
    #[validate(range(min = 0.0))]
    pub max_price: Option<f64>,
    /// 1-based
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    #[serde(default, alias = "sortBy")]
    pub sort_by: ProductSortField,
    #[serde(default, alias = "sortOrder")]
    pub sort_order: SortOrder,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            search: None,
            min_price: None,
            max_price: None,
            page: default_page(),
            limit: default_limit(),
            sort_by: ProductSortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ProductFilter {
    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1) * self.limit
    }
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// One page of products plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub data: Vec<ProductWithRating>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl ProductPage {
    pub fn new(data: Vec<ProductWithRating>, total: u64, page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            parent_id: input.parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(parent_id) = update.parent_id {
            self.parent_id = Some(parent_id);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}
