use axum_helpers::{FieldError, PageMeta, input};
use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString, VariantNames};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::{ProductError, ProductResult};

const CATEGORY_MESSAGE: &str = "Category must be one of: Electronics, Clothing, Books, Home & Garden, Sports, Toys, Food, Other";

/// Quantities below this (and above zero) are "Low Stock"
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Current time at the store's millisecond precision.
pub(crate) fn now() -> DateTime<Utc> {
    bson::DateTime::now().to_chrono()
}

/// Product category
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantNames,
    ToSchema,
)]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Books,
    #[serde(rename = "Home & Garden")]
    #[strum(serialize = "Home & Garden")]
    HomeGarden,
    Sports,
    Toys,
    Food,
    Other,
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    if ProductCategory::from_str(category).is_ok() {
        return Ok(());
    }

    let mut err = ValidationError::new("category").with_message(Cow::Borrowed(CATEGORY_MESSAGE));
    err.add_param(Cow::Borrowed("value"), &category);
    Err(err)
}

/// Derived from quantity at read time; never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
pub enum StockStatus {
    #[serde(rename = "Out of Stock")]
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    #[strum(serialize = "Low Stock")]
    LowStock,
    #[serde(rename = "In Stock")]
    #[strum(serialize = "In Stock")]
    InStock,
}

impl StockStatus {
    pub fn for_quantity(quantity: i32) -> Self {
        match quantity {
            q if q <= 0 => StockStatus::OutOfStock,
            q if q < LOW_STOCK_THRESHOLD => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }
}

/// Product document as stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: ProductCategory,
    pub in_stock: bool,
    pub quantity: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a new document with a fresh id and matching timestamps.
    pub fn new(new_product: NewProduct) -> Self {
        let now = now();
        Self {
            id: ObjectId::new(),
            name: new_product.name,
            description: new_product.description,
            price: new_product.price,
            category: new_product.category,
            in_stock: new_product.in_stock,
            quantity: new_product.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_quantity(self.quantity)
    }

    /// Applies the provided fields and bumps `updated_at`.
    ///
    /// An unknown category leaves the stored one untouched; requests are
    /// validated before they get here.
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
        if let Some(category) = update.category.as_deref().and_then(|c| c.parse().ok()) {
            self.category = category;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        self.updated_at = now().max(self.created_at);
    }

    /// Re-checks every field rule against the document about to be written.
    pub fn ensure_valid(&self) -> ProductResult<()> {
        UpdateProduct::from(self)
            .validate()
            .map_err(ProductError::from)
    }
}

/// Request body for creating a product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(
        required(message = "Product name must be between 2 and 100 characters"),
        length(min = 2, max = 100, message = "Product name must be between 2 and 100 characters")
    )]
    #[schema(example = "Desk Lamp")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    #[schema(example = "Adjustable LED desk lamp")]
    pub description: Option<String>,

    #[validate(
        required(message = "Price must be a positive number"),
        range(min = 0.0, message = "Price must be a positive number")
    )]
    #[schema(example = 19.99)]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(
        required(message = "Category must be one of: Electronics, Clothing, Books, Home & Garden, Sports, Toys, Food, Other"),
        custom(function = "validate_category")
    )]
    #[schema(example = "Home & Garden")]
    pub category: Option<String>,

    /// Defaults to true
    pub in_stock: Option<bool>,

    /// Defaults to 0
    #[validate(range(min = 0, message = "Quantity must be a non-negative integer"))]
    #[schema(example = 0)]
    pub quantity: Option<i32>,
}

impl CreateProduct {
    /// Validates and applies defaults.
    pub fn into_new_product(self) -> ProductResult<NewProduct> {
        self.validate()?;

        let category = self
            .category
            .as_deref()
            .and_then(|c| ProductCategory::from_str(c).ok());

        match (self.name, self.price, category) {
            (Some(name), Some(price), Some(category)) => Ok(NewProduct {
                name,
                description: self.description,
                price,
                category,
                in_stock: self.in_stock.unwrap_or(true),
                quantity: self.quantity.unwrap_or(0),
            }),
            _ => Err(ProductError::Validation(Vec::new())),
        }
    }
}

/// A validated create request with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: ProductCategory,
    pub in_stock: bool,
    pub quantity: i32,
}

/// Request body for updating a product; only provided fields change
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(length(min = 2, max = 100, message = "Product name must be between 2 and 100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,

    pub in_stock: Option<bool>,

    #[validate(range(min = 0, message = "Quantity must be a non-negative integer"))]
    pub quantity: Option<i32>,
}

impl From<&Product> for UpdateProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            description: product.description.clone(),
            price: Some(product.price),
            category: Some(product.category.to_string()),
            in_stock: Some(product.in_stock),
            quantity: Some(product.quantity),
        }
    }
}

/// Raw list query; see [`ProductFilter::from_query`]
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Page number (default 1)
    #[param(value_type = Option<u64>, minimum = 1)]
    pub page: Option<String>,
    /// Products per page (default 10, max 100)
    #[param(value_type = Option<u64>, minimum = 1, maximum = 100)]
    pub limit: Option<String>,
    /// Exact category, e.g. `Home & Garden`
    pub category: Option<String>,
    /// Inclusive lower price bound
    #[param(value_type = Option<f64>, minimum = 0)]
    pub min_price: Option<String>,
    /// Inclusive upper price bound
    #[param(value_type = Option<f64>, minimum = 0)]
    pub max_price: Option<String>,
    /// `true` for in-stock products; any other value selects out-of-stock ones
    #[param(value_type = Option<bool>)]
    pub in_stock: Option<String>,
    /// Case-insensitive match on name or description
    pub search: Option<String>,
}

/// Store-level product filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    /// Literal, case-insensitive substring
    pub search: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_price(field: &str, raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<f64> {
    let raw = raw?;
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() => Some(price),
        _ => {
            errors.push(FieldError::new(field, format!("{field} must be a number"), raw));
            None
        }
    }
}

impl ProductFilter {
    /// Builds the filter from query values. Empty values are ignored; a
    /// price bound that is not a number is a validation failure.
    pub fn from_query(query: &ProductListQuery) -> ProductResult<Self> {
        let mut errors = Vec::new();
        let min_price = parse_price("minPrice", non_empty(&query.min_price), &mut errors);
        let max_price = parse_price("maxPrice", non_empty(&query.max_price), &mut errors);
        if !errors.is_empty() {
            return Err(ProductError::Validation(errors));
        }

        Ok(Self {
            category: non_empty(&query.category).map(str::to_string),
            min_price,
            max_price,
            in_stock: query.in_stock.as_deref().map(|v| v == "true"),
            search: non_empty(&query.search).map(str::to_string),
        })
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref category) = self.category {
            if product.category.as_ref() != category.as_str() {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.in_stock.is_some_and(|in_stock| product.in_stock != in_stock) {
            return false;
        }
        if let Some(ref search) = self.search {
            let term = search.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&term);
            let in_description = product
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&term));
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    #[schema(example = "64b7f0c2a1b2c3d4e5f60720")]
    pub object_id: String,
    #[schema(example = "64b7f0c2a1b2c3d4e5f60720")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: ProductCategory,
    pub in_stock: bool,
    pub quantity: i32,
    pub stock_status: StockStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let id = product.id.to_hex();
        Self {
            object_id: id.clone(),
            id,
            stock_status: product.stock_status(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            in_stock: product.in_stock,
            quantity: product.quantity,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_products: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PageMeta> for ProductPagination {
    fn from(meta: PageMeta) -> Self {
        Self {
            current_page: meta.current_page,
            total_pages: meta.total_pages,
            total_products: meta.total_count,
            has_next: meta.has_next,
            has_prev: meta.has_prev,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub pagination: ProductPagination,
}

impl ProductListResponse {
    pub fn new(products: Vec<Product>, meta: PageMeta) -> Self {
        Self {
            products: products.into_iter().map(ProductResponse::from).collect(),
            pagination: meta.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProductResponse {
    #[schema(example = "Product deleted successfully")]
    pub message: String,
    pub deleted_product: ProductResponse,
}

impl From<Product> for DeletedProductResponse {
    fn from(product: Product) -> Self {
        Self {
            message: "Product deleted successfully".to_string(),
            deleted_product: product.into(),
        }
    }
}
